//! Data models for the file combination engine.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Settings`]: The complete user configuration — built-in file type rules,
//!   custom types, exclusion rules, and processing options
//! - [`FileTypeRule`], [`CustomFileType`], [`ExclusionRule`], [`ProcessingOptions`]:
//!   The individual configuration building blocks
//! - [`CombinedDocument`]: The session-owned combined output and its counters
//! - [`ValidationError`]: Rejection reasons for malformed mutator input
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Serializable**: All config structs derive `Serialize`/`Deserialize` for
//!   per-key YAML persistence via [`SettingsStore`](crate::config::SettingsStore)
//! - **Pure**: Mutators are synchronous state transitions; the write-back side
//!   effect lives in [`Session`](crate::state::Session), not here
//! - **Session-owned**: There is exactly one logical owner per session, so no
//!   locking is required

pub mod document;
pub mod settings;

pub use document::{CombinedDocument, DocumentStats};
pub use settings::{
    CustomFileType, ExclusionRule, FileTypeRule, ProcessingOptions, Settings, ValidationError,
    default_exclusion_rules, default_file_types,
};
