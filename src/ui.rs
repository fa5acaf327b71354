pub mod big_text;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};

use crate::{
    app::App,
    game::{StepTone, COUNTDOWN_STEPS},
    ui::big_text::BigText,
    APP_VERSION,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(app.screen).render(app, f);
}

fn tone_color(tone: StepTone) -> Color {
    match tone {
        StepTone::Danger => Color::Red,
        StepTone::Warning => Color::Yellow,
        StepTone::Success => Color::Green,
        StepTone::Plain => Color::White,
    }
}

/// Centered rect covering `percent` of the width of `area`.
fn inset_width(area: Rect, percent: u16) -> Rect {
    let width = (area.width as u32 * percent as u32 / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

pub fn render_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(2), // notice
            Constraint::Min(1),    // categories
            Constraint::Length(1), // sensor
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "BrainScreen",
        bold_style.fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    if let Some(notice) = &app.notice {
        Paragraph::new(Span::styled(
            format!("Could not start: {notice}"),
            Style::default().fg(Color::Red),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
    }

    let lines: Vec<Line> = app
        .categories
        .iter()
        .enumerate()
        .map(|(idx, category)| {
            if idx == app.selected {
                Line::from(Span::styled(
                    format!("> {category} <"),
                    bold_style.add_modifier(Modifier::REVERSED),
                ))
            } else {
                Line::from(Span::raw(category.as_str()))
            }
        })
        .collect();

    // Keep the selection visible on short terminals
    let visible = chunks[2].height as usize;
    let offset = (app.selected + 1).saturating_sub(visible) as u16;

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .scroll((offset, 0))
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(app.sensor.label(), dim_style))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        format!("(↑/↓) choose / (enter) play / (esc)ape   {APP_VERSION}"),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[4], buf);
}

pub fn render_countdown(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(step) = COUNTDOWN_STEPS.get(app.countdown_step) else {
        return;
    };
    let style = Style::default()
        .fg(tone_color(step.tone))
        .add_modifier(Modifier::BOLD);

    BigText::new(step.label, style).render(inset_width(area, 90), buf);
}

pub fn render_game(app: &App, area: Rect, buf: &mut Buffer) {
    let dim_bold_style = Style::default()
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // timer
            Constraint::Min(1),    // word
            Constraint::Length(1), // sensor readout
        ])
        .split(area);

    let timer_style = if app.time_remaining <= app.game.config().session.warning_at_secs {
        dim_bold_style.fg(Color::Red)
    } else {
        dim_bold_style
    };
    Paragraph::new(Span::styled(app.time_remaining.to_string(), timer_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    if let Some(word) = &app.word {
        BigText::new(word, Style::default().add_modifier(Modifier::BOLD))
            .render(inset_width(chunks[1], 90), buf);
    }

    let readout = match &app.last_sample {
        Some(s) => format!("x:{:.1} y:{:.1} z:{:.1}", s.x, s.y, s.z),
        None => app.sensor.label(),
    };
    Paragraph::new(Span::styled(
        readout,
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);
}

pub fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(results) = &app.results else {
        return;
    };
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = bold_style.fg(Color::Green);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // summary
            Constraint::Min(1),    // words
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(results.summary(), bold_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let lines: Vec<Line> = results
        .entries()
        .map(|(word, correct)| {
            if correct {
                Line::from(Span::styled(word, green_bold_style))
            } else {
                Line::from(Span::raw(word))
            }
        })
        .collect();
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("(m)enu / (esc)ape   {APP_VERSION}"),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[2], buf);
}
