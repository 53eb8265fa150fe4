//! Root view, a pure function of the session state.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use super::{DeckScreen, LoadingScreen, WelcomeScreen};
use crate::domain::SessionState;
use crate::presentation::widgets::{FooterBar, HeaderBar, KeyHint};

const QUIT: KeyHint = KeyHint::new("QUIT", "q");
const UNAUTHENTICATED_HINTS: &[KeyHint] = &[KeyHint::new("SIGN IN", "Enter/l"), QUIT];
const AUTHENTICATED_HINTS: &[KeyHint] = &[KeyHint::new("SIGN OUT", "o"), QUIT];

pub struct SessionView<'a> {
    state: &'a SessionState,
    title: &'a str,
    version: &'a str,
}

impl<'a> SessionView<'a> {
    #[must_use]
    pub const fn new(state: &'a SessionState, title: &'a str, version: &'a str) -> Self {
        Self {
            state,
            title,
            version,
        }
    }

    const fn hints(&self) -> &'static [KeyHint] {
        match self.state {
            SessionState::Loading => &[],
            SessionState::Unauthenticated => UNAUTHENTICATED_HINTS,
            SessionState::Authenticated(_) => AUTHENTICATED_HINTS,
        }
    }
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        HeaderBar::new(self.title, self.version)
            .user_label(self.state.identity().map(|identity| identity.label()))
            .render(header, buf);

        match self.state {
            SessionState::Loading => LoadingScreen.render(body, buf),
            SessionState::Unauthenticated => WelcomeScreen::new(self.title).render(body, buf),
            SessionState::Authenticated(identity) => DeckScreen::new(identity).render(body, buf),
        }

        FooterBar::new(self.hints()).render(footer, buf);
    }
}
