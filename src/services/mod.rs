//! Services module - Pure business logic for file combination.
//!
//! Everything here is framework-agnostic: no I/O beyond what the caller hands
//! in, no UI dependencies, all inputs explicit parameters. The presentation
//! layer (CLI or GUI) sits on top of these services via the session in
//! [`crate::state`].
//!
//! # Components
//!
//! - [`build_accept_spec`]: Derives the MIME type → extensions accept map
//!   from the current settings, for file-picker filtering.
//! - [`ExclusionMatcher`]: Compiles enabled wildcard exclusion rules into
//!   anchored, case-insensitive match predicates.
//! - [`Preprocessor`]: Optional idempotent blank-line normalization applied
//!   to each file before combination.
//! - [`Combiner`]: Drives one batch through exclusion, preprocessing, and
//!   header generation, appending to the combined document and reporting
//!   what was accepted and what was excluded.

pub mod accept;
pub mod combine;
pub mod exclusion;
pub mod preprocess;

pub use accept::build_accept_spec;
pub use combine::{BatchFile, CombineError, CombineReport, Combiner, copy_text};
pub use exclusion::{ExclusionMatcher, is_excluded};
pub use preprocess::Preprocessor;
