use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use super::utils::centered_fixed;

const LOADING_TEXT: &str = "Loading...";

/// Shown until the first session notification arrives.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadingScreen;

impl Widget for LoadingScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = u16::try_from(LOADING_TEXT.len()).unwrap_or(u16::MAX);
        let line = Line::styled(
            LOADING_TEXT,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        );
        Paragraph::new(line).render(centered_fixed(width, 1, area), buf);
    }
}
