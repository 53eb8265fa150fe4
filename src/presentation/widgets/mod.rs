mod footer_bar;
mod header_bar;

pub use footer_bar::{FooterBar, FooterBarStyle, KeyHint};
pub use header_bar::{HeaderBar, HeaderBarStyle};
