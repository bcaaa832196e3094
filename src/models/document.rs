/// The single growing text artifact produced by combining accepted files.
///
/// Owned exclusively by the active [`Session`](crate::state::Session) and
/// never persisted. Grows monotonically by append; `clear()` resets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedDocument {
    pub text: String,
    pub file_count: usize,
}

/// Running statistics for a combined document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub characters: usize,
    pub lines: usize,
    pub files: usize,
}

impl CombinedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the document to empty. Idempotent.
    pub fn clear(&mut self) {
        self.text.clear();
        self.file_count = 0;
    }

    /// True when the document holds no meaningful text (empty or whitespace).
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Compute character, line, and file counts for display.
    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            characters: self.text.chars().count(),
            lines: if self.text.is_empty() {
                0
            } else {
                self.text.split('\n').count()
            },
            files: self.file_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_empty() {
        let document = CombinedDocument::new();
        assert!(document.is_empty());
        assert_eq!(document.file_count, 0);
        assert_eq!(document.stats(), DocumentStats { characters: 0, lines: 0, files: 0 });
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let document = CombinedDocument {
            text: "   \n\t ".to_string(),
            file_count: 0,
        };
        assert!(document.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut document = CombinedDocument {
            text: "// a.txt\nhello\n\n".to_string(),
            file_count: 1,
        };

        document.clear();
        assert_eq!(document, CombinedDocument::new());

        document.clear();
        assert_eq!(document, CombinedDocument::new());
    }

    #[test]
    fn test_stats() {
        let document = CombinedDocument {
            text: "// a.txt\nhello\n\n".to_string(),
            file_count: 1,
        };

        let stats = document.stats();
        assert_eq!(stats.characters, 16);
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.files, 1);
    }
}
