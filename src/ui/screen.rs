use ratatui::Frame;

use crate::{
    app::App,
    game::ScreenId,
    ui::{render_countdown, render_game, render_menu, render_results},
};

/// A UI Screen boundary: responsible for rendering one view
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_menu(app, f.area(), f.buffer_mut());
    }
}

pub struct CountdownScreen;

impl Screen for CountdownScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_countdown(app, f.area(), f.buffer_mut());
    }
}

pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_game(app, f.area(), f.buffer_mut());
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_results(app, f.area(), f.buffer_mut());
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(screen: ScreenId) -> Box<dyn Screen> {
    match screen {
        ScreenId::Menu => Box::new(MenuScreen),
        ScreenId::Countdown => Box::new(CountdownScreen),
        ScreenId::Game => Box::new(GameScreen),
        ScreenId::Results => Box::new(ResultsScreen),
    }
}
