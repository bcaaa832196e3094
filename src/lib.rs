// FileCombine - Rule-based file intake and combination engine
//
// This is the library crate containing the core business logic and data
// structures. The binary crate (main.rs) provides the CLI entry point.

pub mod config;
pub mod intake;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::SettingsStore;
pub use models::{CombinedDocument, DocumentStats, Settings, ValidationError};
pub use services::{BatchFile, CombineError, CombineReport, Combiner};
pub use state::Session;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
