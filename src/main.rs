//! FileCombine - Rule-based file intake and combination engine
//!
//! Main entry point for the CLI frontend.
//!
//! # Execution Flow
//!
//! 1. Initialize logging → logs/filecombine.<date>
//! 2. Open the settings store in `FileCombine Data/` and hydrate a session
//!    (missing or corrupt settings files fall back to defaults per field)
//! 3. Read the files named on the command line as one batch
//! 4. Combine the batch under the persisted settings
//! 5. Print the combined document to stdout; per-file diagnostics go to
//!    stderr so the output stays pipeable
//!
//! # Configuration Files
//!
//! Expected in `FileCombine Data/`, one YAML file per settings key
//! (`file_types.yaml`, `exclusion_rules.yaml`, ...). All are optional and
//! created on first write.

use anyhow::Result;
use camino::Utf8PathBuf;
use filecombine::{APP_NAME, Session, SettingsStore, VERSION};
use std::process::ExitCode;

/// Run one batch through the engine and print the result.
///
/// # Errors
///
/// This function can fail if:
/// - Logging initialization fails (disk space, permissions)
/// - The settings directory cannot be created
/// - An argument is not valid UTF-8
fn main() -> Result<ExitCode> {
    // Setup logging with file output only; stderr carries the batch report
    let _guard = filecombine::logging::setup_logging("logs", "filecombine", false, false)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let store = SettingsStore::new("FileCombine Data")?;
    let mut session = Session::load(store);

    let args: Vec<Utf8PathBuf> = std::env::args_os()
        .skip(1)
        .map(|arg| {
            Utf8PathBuf::from_path_buf(arg.into())
                .map_err(|bad| anyhow::anyhow!("Argument is not valid UTF-8: {}", bad.display()))
        })
        .collect::<Result<_>>()?;

    if args.is_empty() {
        eprintln!("Usage: {} <file>...", APP_NAME);
        return Ok(ExitCode::FAILURE);
    }

    let paths: Vec<&camino::Utf8Path> = args.iter().map(Utf8PathBuf::as_path).collect();
    let (batch, failures) = filecombine::intake::read_batch(&paths);
    for failure in &failures {
        eprintln!("Skipped {}: {}", failure.name, failure.reason);
    }

    let report = session.intake(&batch);
    for name in &report.excluded_files {
        eprintln!("Excluded by rule: {}", name);
    }

    let stats = session.stats();
    eprintln!(
        "Combined {} of {} files ({} characters, {} lines)",
        report.accepted_count,
        args.len(),
        stats.characters,
        stats.lines
    );

    match session.copy_text() {
        Ok(text) => {
            print!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
