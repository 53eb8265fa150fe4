use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::utils::centered_fixed;
use crate::domain::{Notification, NotificationLevel};

const DISMISS_HINT: &str = "Press any key to dismiss";
const MAX_POPUP_WIDTH: u16 = 60;

/// Centered popup for the current notice.
pub struct NotificationPopup<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationPopup<'a> {
    #[must_use]
    pub const fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.notification.title);
        let message = &self.notification.message;

        let widest = message
            .lines()
            .map(UnicodeWidthStr::width)
            .chain([title.width()])
            .chain(self.notification.blocking.then(|| DISMISS_HINT.width()))
            .max()
            .unwrap_or(0);

        let max_popup_width = MAX_POPUP_WIDTH.min(area.width.saturating_sub(2));
        let width = u16::try_from(widest)
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(max_popup_width);
        let inner_width = usize::from(width.saturating_sub(2).max(1));

        let mut lines: Vec<Line> = message.lines().map(Line::from).collect();
        let mut text_rows: usize = message
            .lines()
            .map(|line| line.width().div_ceil(inner_width).max(1))
            .sum();
        if self.notification.blocking {
            lines.push(Line::default());
            lines.push(Line::styled(
                DISMISS_HINT,
                Style::default().fg(Color::DarkGray),
            ));
            text_rows += 2;
        }

        let height = u16::try_from(text_rows)
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .clamp(3, 12);

        let popup_area = centered_fixed(width, height, area);
        if popup_area.area() == 0 {
            return;
        }

        let color = match self.notification.level {
            NotificationLevel::Info => Color::Yellow,
            NotificationLevel::Warn => Color::LightYellow,
            NotificationLevel::Error => Color::Red,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        let para = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .centered();

        Clear.render(popup_area, buf);
        para.render(popup_area, buf);
    }
}
