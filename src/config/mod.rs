//! Persistent CLI preferences.
//!
//! Preferences only shape the terminal front-end and seed the defaults of a
//! fresh [`crate::domain::FormRecord`]; collected form data is never written.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{AccessibilitySettings, Config};
