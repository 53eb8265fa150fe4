//! UI screens.

mod app;
mod deck_screen;
mod loading_screen;
mod notification_popup;
mod session_view;
mod utils;
mod welcome_screen;

pub use app::App;
pub use deck_screen::DeckScreen;
pub use loading_screen::LoadingScreen;
pub use notification_popup::NotificationPopup;
pub use session_view::SessionView;
pub use welcome_screen::WelcomeScreen;
