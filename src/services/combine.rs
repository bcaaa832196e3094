use crate::models::{CombinedDocument, Settings};
use crate::services::exclusion::ExclusionMatcher;
use crate::services::preprocess::Preprocessor;
use chrono::{SecondsFormat, Utc};
use thiserror::Error;

/// One candidate file of a batch: its display name and its already-read text.
///
/// Reading the raw content is the intake boundary's job
/// ([`crate::intake::read_batch`]); by the time a file reaches the combiner it
/// is plain text, and the combiner performs no I/O of its own.
#[derive(Debug, Clone)]
pub struct BatchFile {
    pub name: String,
    pub text: String,
}

impl BatchFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Outcome of one batch intake, for the presentation layer to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombineReport {
    pub accepted_count: usize,
    pub excluded_files: Vec<String>,
}

/// Errors from combiner operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombineError {
    #[error("Nothing to copy: the combined document is empty")]
    EmptyContent,
}

/// Assembles accepted, optionally preprocessed files into the combined
/// document, producing per-file headers and a batch report.
///
/// Files are processed strictly in the order supplied; there is no reordering
/// and no parallel fan-out, so headers, sequence numbers, and the resulting
/// text are deterministic for a given batch and prior document state.
pub struct Combiner {
    preprocessor: Preprocessor,
}

impl Combiner {
    pub fn new() -> Self {
        Self {
            preprocessor: Preprocessor::new(),
        }
    }

    /// Process one batch against the document.
    ///
    /// Per file, in order:
    /// 1. Exclusion check — a match is a policy decision, not an error; the
    ///    name is recorded in the report and processing continues.
    /// 2. Optional blank-line normalization.
    /// 3. Header: `// <name>`, or `// File <N>` with N continuous across
    ///    batches (the document's accepted-file count + 1). When timestamps
    ///    are on, the current UTC instant in RFC 3339 is appended in
    ///    parentheses before the newline.
    /// 4. Append `header\n` + text + `\n\n` and bump the file count.
    ///
    /// A batch whose every file is excluded leaves the document unchanged and
    /// reports `accepted_count == 0`; that is not an error.
    pub fn intake(
        &self,
        document: &mut CombinedDocument,
        batch: &[BatchFile],
        settings: &Settings,
    ) -> CombineReport {
        let matcher = ExclusionMatcher::compile(&settings.exclusion_rules);
        let options = &settings.options;
        let mut report = CombineReport::default();

        for file in batch {
            if matcher.is_excluded(&file.name) {
                tracing::info!("Excluded by rule: {}", file.name);
                report.excluded_files.push(file.name.clone());
                continue;
            }

            let body = self
                .preprocessor
                .normalize(&file.text, options.enable_preprocessing);

            let mut header = if options.include_file_names {
                format!("// {}", file.name)
            } else {
                format!("// File {}", document.file_count + 1)
            };
            if options.include_timestamp {
                header.push_str(&format!(
                    " ({})",
                    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
                ));
            }

            document.text.push_str(&header);
            document.text.push('\n');
            document.text.push_str(&body);
            document.text.push_str("\n\n");
            document.file_count += 1;
            report.accepted_count += 1;
        }

        tracing::debug!(
            "Batch complete: {} accepted, {} excluded, document now holds {} files",
            report.accepted_count,
            report.excluded_files.len(),
            document.file_count
        );
        report
    }

    /// Reset the document to empty. Idempotent.
    pub fn clear(&self, document: &mut CombinedDocument) {
        document.clear();
        tracing::info!("Combined document cleared");
    }
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new()
    }
}

/// Hand out the document text for the clipboard boundary.
///
/// # Errors
/// [`CombineError::EmptyContent`] when the trimmed text is empty. Actually
/// placing the text on the system clipboard is the caller's job.
pub fn copy_text(document: &CombinedDocument) -> Result<&str, CombineError> {
    if document.is_empty() {
        return Err(CombineError::EmptyContent);
    }
    Ok(&document.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_settings() -> Settings {
        // No exclusion rules, default options
        Settings {
            exclusion_rules: Vec::new(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_order_preserved_and_counted() {
        let combiner = Combiner::new();
        let mut document = CombinedDocument::new();
        let batch = vec![
            BatchFile::new("a.txt", "alpha"),
            BatchFile::new("b.txt", "beta"),
            BatchFile::new("c.txt", "gamma"),
        ];

        let report = combiner.intake(&mut document, &batch, &plain_settings());

        assert_eq!(report.accepted_count, 3);
        assert!(report.excluded_files.is_empty());
        assert_eq!(document.file_count, 3);
        assert_eq!(
            document.text,
            "// a.txt\nalpha\n\n// b.txt\nbeta\n\n// c.txt\ngamma\n\n"
        );
    }

    #[test]
    fn test_partial_exclusion() {
        let combiner = Combiner::new();
        let mut document = CombinedDocument::new();
        let mut settings = plain_settings();
        settings.add_exclusion_rule("a.test.ts").unwrap();

        let batch = vec![
            BatchFile::new("a.test.ts", "excluded"),
            BatchFile::new("b.ts", "kept"),
        ];
        let report = combiner.intake(&mut document, &batch, &settings);

        assert_eq!(report.accepted_count, 1);
        assert_eq!(report.excluded_files, vec!["a.test.ts".to_string()]);
        assert_eq!(document.text, "// b.ts\nkept\n\n");
        assert_eq!(document.file_count, 1);
    }

    #[test]
    fn test_all_excluded_leaves_document_unchanged() {
        let combiner = Combiner::new();
        let mut document = CombinedDocument::new();
        let settings = Settings::default(); // includes *.test.*

        let batch = vec![BatchFile::new("a.test.ts", "x")];
        let report = combiner.intake(&mut document, &batch, &settings);

        assert_eq!(report.accepted_count, 0);
        assert_eq!(report.excluded_files.len(), 1);
        assert_eq!(document, CombinedDocument::new());
    }

    #[test]
    fn test_sequential_headers_continue_across_batches() {
        let combiner = Combiner::new();
        let mut document = CombinedDocument::new();
        let mut settings = plain_settings();
        settings.options.include_file_names = false;

        combiner.intake(
            &mut document,
            &[BatchFile::new("a.txt", "a"), BatchFile::new("b.txt", "b")],
            &settings,
        );
        combiner.intake(&mut document, &[BatchFile::new("c.txt", "c")], &settings);

        assert_eq!(
            document.text,
            "// File 1\na\n\n// File 2\nb\n\n// File 3\nc\n\n"
        );
    }

    #[test]
    fn test_timestamp_appended_before_newline() {
        let combiner = Combiner::new();
        let mut document = CombinedDocument::new();
        let mut settings = plain_settings();
        settings.options.include_timestamp = true;

        combiner.intake(&mut document, &[BatchFile::new("a.txt", "x")], &settings);

        let header = document.text.lines().next().unwrap();
        assert!(header.starts_with("// a.txt ("), "header was {:?}", header);
        assert!(header.ends_with("Z)"), "header was {:?}", header);
    }

    #[test]
    fn test_preprocessing_applied_when_enabled() {
        let combiner = Combiner::new();
        let mut settings = plain_settings();

        let batch = vec![BatchFile::new("a.txt", "x\n\n\n\ny")];

        let mut untouched = CombinedDocument::new();
        combiner.intake(&mut untouched, &batch, &settings);
        assert_eq!(untouched.text, "// a.txt\nx\n\n\n\ny\n\n");

        settings.options.enable_preprocessing = true;
        let mut normalized = CombinedDocument::new();
        combiner.intake(&mut normalized, &batch, &settings);
        assert_eq!(normalized.text, "// a.txt\nx\n\ny\n\n");
    }

    #[test]
    fn test_clear_resets_document() {
        let combiner = Combiner::new();
        let mut document = CombinedDocument::new();
        combiner.intake(
            &mut document,
            &[BatchFile::new("a.txt", "x")],
            &plain_settings(),
        );

        combiner.clear(&mut document);
        assert_eq!(document, CombinedDocument::new());

        // Idempotent
        combiner.clear(&mut document);
        assert_eq!(document, CombinedDocument::new());
    }

    #[test]
    fn test_copy_text_guards_empty_and_whitespace() {
        let empty = CombinedDocument::new();
        assert_eq!(copy_text(&empty), Err(CombineError::EmptyContent));

        let blank = CombinedDocument {
            text: "   ".to_string(),
            file_count: 0,
        };
        assert_eq!(copy_text(&blank), Err(CombineError::EmptyContent));

        let full = CombinedDocument {
            text: "// a.txt\nx\n\n".to_string(),
            file_count: 1,
        };
        assert_eq!(copy_text(&full), Ok("// a.txt\nx\n\n"));
    }
}
