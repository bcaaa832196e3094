use regex::Regex;
use std::borrow::Cow;

/// Optional per-file text normalization applied before combination.
///
/// The single pass collapses any run of three-or-more line breaks, possibly
/// with horizontal whitespace between them, down to exactly two — multiple
/// blank lines become a single blank line. Content outside blank-line runs is
/// never altered, and the pass is idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
pub struct Preprocessor {
    /// Matches a newline followed by two-or-more further (possibly
    /// whitespace-padded) newlines, i.e. at least two blank lines in a row
    blank_run_pattern: Regex,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            blank_run_pattern: Regex::new(r"\n(?:[ \t\r]*\n){2,}")
                .expect("Invalid blank run regex"),
        }
    }

    /// Collapse excess blank lines when enabled; pass through unchanged otherwise.
    pub fn normalize<'a>(&self, text: &'a str, enabled: bool) -> Cow<'a, str> {
        if !enabled {
            return Cow::Borrowed(text);
        }
        self.blank_run_pattern.replace_all(text, "\n\n")
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
