use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub struct HeaderBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub version: Style,
    pub user: Style,
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            version: Style::default().bg(Color::DarkGray).fg(Color::White),
            user: Style::default()
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Top line with the application title and, when signed in, the user label.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    user_label: Option<&'a str>,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(app_name: &'a str, version: &'a str) -> Self {
        Self {
            app_name,
            version,
            user_label: None,
            style: HeaderBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn user_label(mut self, label: Option<&'a str>) -> Self {
        self.user_label = label;
        self
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let app_name = format!(" {} ", self.app_name);
        let version = format!(" v{} ", self.version);
        let left_width = u16::try_from(app_name.width() + 1 + version.width()).unwrap_or(u16::MAX);
        let left_line = Line::from(vec![
            Span::styled(app_name, self.style.app_name),
            Span::raw(" "),
            Span::styled(version, self.style.version),
        ]);
        let left_area = Rect::new(area.x, area.y, left_width.min(area.width), 1);
        Paragraph::new(left_line).render(left_area, buf);

        let Some(label) = self.user_label else {
            return;
        };

        let user = format!(" ● {label} ");
        let user_width = u16::try_from(user.width()).unwrap_or(u16::MAX);
        if user_width < area.width.saturating_sub(left_width) {
            let right_x = area.right().saturating_sub(user_width);
            let right_area = Rect::new(right_x, area.y, user_width, 1);
            Paragraph::new(Line::from(Span::styled(user, self.style.user))).render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(header: HeaderBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        header.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_header_shows_title_and_version() {
        let line = render(HeaderBar::new("Zaimu Anki", "0.1.0"), 60);
        assert!(line.starts_with(" Zaimu Anki   v0.1.0 "));
    }

    #[test]
    fn test_header_shows_user_on_the_right() {
        let line = render(
            HeaderBar::new("Zaimu Anki", "0.1.0").user_label(Some("Taro")),
            60,
        );
        assert!(line.trim_end().ends_with("● Taro"));
    }

    #[test]
    fn test_user_label_dropped_when_too_narrow() {
        let line = render(
            HeaderBar::new("Zaimu Anki", "0.1.0").user_label(Some("Taro")),
            24,
        );
        assert!(!line.contains("Taro"));
    }
}
