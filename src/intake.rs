//! Intake boundary - reads candidate files from disk into batch entries.
//!
//! This is the only place the engine touches file content on disk. Read
//! failures are recorded per file and never abort the batch; the combiner
//! downstream sees only the files that were actually readable.

use crate::services::BatchFile;
use camino::Utf8Path;
use std::fs;

/// One file that could not be read, with the reason for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFailure {
    pub name: String,
    pub reason: String,
}

/// Read a batch of paths into memory, preserving order.
///
/// The batch entry name is the file name component of the path (the full path
/// if it has no file name), which is what exclusion rules match against and
/// what headers display. A path that cannot be read as UTF-8 text yields a
/// [`ReadFailure`] instead of an entry; the rest of the batch is unaffected.
pub fn read_batch(paths: &[&Utf8Path]) -> (Vec<BatchFile>, Vec<ReadFailure>) {
    let mut files = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();

    for path in paths {
        let name = path.file_name().unwrap_or(path.as_str()).to_string();

        match fs::read_to_string(path) {
            Ok(text) => files.push(BatchFile::new(name, text)),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path, e);
                failures.push(ReadFailure {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        "Read batch: {} files loaded, {} failures",
        files.len(),
        failures.len()
    );
    (files, failures)
}
