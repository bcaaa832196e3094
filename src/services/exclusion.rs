use crate::models::ExclusionRule;
use regex::{Regex, RegexBuilder};

/// Compiled exclusion predicates for one batch of candidate files.
///
/// Pattern semantics: `*` matches any run of zero-or-more characters; every
/// other character is literal and case-insensitive, anchored over the whole
/// file name. Each segment between wildcards is passed through
/// `regex::escape` before substitution so user-supplied metacharacters cannot
/// change the match semantics — `file.txt` must match a literal dot only.
pub struct ExclusionMatcher {
    patterns: Vec<Regex>,
}

impl ExclusionMatcher {
    /// Compile the enabled rules into match predicates.
    ///
    /// Disabled rules are skipped entirely. A pattern that fails to compile
    /// (should not happen after escaping) is dropped with a warning rather
    /// than poisoning the whole set.
    pub fn compile(rules: &[ExclusionRule]) -> Self {
        let patterns = rules
            .iter()
            .filter(|rule| rule.enabled)
            .filter_map(|rule| match compile_pattern(&rule.pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!("Skipping unusable exclusion pattern \"{}\": {}", rule.pattern, e);
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    /// True if any enabled rule matches the full file name.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|regex| regex.is_match(file_name))
    }
}

/// One-shot form of the matcher for callers holding a rule slice.
pub fn is_excluded(file_name: &str, rules: &[ExclusionRule]) -> bool {
    ExclusionMatcher::compile(rules).is_excluded(file_name)
}

fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let escaped: Vec<String> = pattern.split('*').map(regex::escape).collect();
    let anchored = format!("^{}$", escaped.join(".*"));

    RegexBuilder::new(&anchored).case_insensitive(true).build()
}
