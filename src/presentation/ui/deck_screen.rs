use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::utils::centered_fixed;
use crate::domain::Identity;

/// Authenticated view. Deck upload is not available yet, so this only greets
/// the user.
pub struct DeckScreen<'a> {
    identity: &'a Identity,
}

impl<'a> DeckScreen<'a> {
    #[must_use]
    pub const fn new(identity: &'a Identity) -> Self {
        Self { identity }
    }
}

impl Widget for DeckScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::styled(
                "✓",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::from(vec![
                Span::raw("Welcome, "),
                Span::styled(
                    self.identity.label(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("."),
            ]),
            Line::from("Please upload a deck."),
            Line::default(),
            Line::styled("[ Sign out ]", Style::default().fg(Color::DarkGray)),
        ];

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX) + 2;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green));

        Paragraph::new(lines)
            .centered()
            .block(block)
            .render(centered_fixed(44, height, area), buf);
    }
}
