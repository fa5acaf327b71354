use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::text_fit::{fit_size, CellMeasure, Measure};

/// Draws `text` at the largest glyph scale that fits the area, centered.
/// A glyph at scale `n` is the character repeated over `n` columns and `n` rows.
pub struct BigText<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> BigText<'a> {
    pub fn new(text: &'a str, style: Style) -> Self {
        Self { text, style }
    }

    pub fn scale_for(text: &str, area: Rect) -> u16 {
        fit_size(
            &CellMeasure,
            text,
            area.width as u32,
            Some(area.height as u32),
        )
    }

    pub fn scaled_line(text: &str, scale: u16) -> String {
        text.chars()
            .map(|c| c.to_string().repeat(scale as usize))
            .collect()
    }
}

impl Widget for BigText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let scale = Self::scale_for(self.text, area);
        let (width, height) = CellMeasure.measure(self.text, scale);
        let width = width.min(area.width as u32) as u16;
        let height = height.min(area.height as u32) as u16;

        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        let line = Self::scaled_line(self.text, scale);
        let max_width = (area.right() - x) as usize;

        for row in 0..height {
            buf.set_stringn(x, y + row, &line, max_width, self.style);
        }
    }
}
