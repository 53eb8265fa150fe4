//! Zaimu Anki - a terminal flashcard client for financial accounting.
//!
//! This iteration signs the user in with a Google account through Firebase
//! Authentication and shows where decks will be uploaded. The crate follows a
//! layered layout: domain types and ports, application services that observe
//! the session, infrastructure adapters for Firebase, Google and the system
//! keyring, and a ratatui presentation layer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the session observer and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "zaimu-anki";
