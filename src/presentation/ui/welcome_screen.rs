use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::utils::centered_fixed;

const SIGN_IN_LABEL: &str = "Sign in with Google";

/// Unauthenticated view with the sign-in control.
pub struct WelcomeScreen<'a> {
    title: &'a str,
}

impl<'a> WelcomeScreen<'a> {
    #[must_use]
    pub const fn new(title: &'a str) -> Self {
        Self { title }
    }
}

impl Widget for WelcomeScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::styled(
                self.title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::from("Welcome!"),
            Line::from("Sign in to start studying."),
            Line::default(),
            Line::from(vec![
                Span::raw("[ "),
                Span::styled(
                    SIGN_IN_LABEL,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" ]"),
            ]),
            Line::styled("press Enter", Style::default().fg(Color::DarkGray)),
        ];

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX) + 2;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(lines)
            .centered()
            .block(block)
            .render(centered_fixed(44, height, area), buf);
    }
}
