//! Domain entity definitions.

mod deck;
mod identity;
mod session;
mod token;

pub use deck::{Card, CsvCardData, Deck};
pub use identity::{FALLBACK_LABEL, Identity, UserId};
pub use session::{SessionEvent, SessionState};
pub use token::SecretToken;
