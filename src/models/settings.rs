use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A built-in file type rule from the default catalog.
///
/// Extensions are canonical: lowercase with a leading dot. Each rule carries
/// one or more MIME types so the intake boundary can build its accept filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileTypeRule {
    pub extension: String,
    pub enabled: bool,
    pub mime_types: Vec<String>,
}

impl FileTypeRule {
    fn enabled(extension: &str, mime_types: &[&str]) -> Self {
        Self {
            extension: extension.to_string(),
            enabled: true,
            mime_types: mime_types.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// A user-defined file type. Always treated as enabled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomFileType {
    pub id: String,
    pub extension: String,
    pub mime_type: String,
}

/// A wildcard exclusion rule applied to candidate file names.
///
/// `*` matches any run of characters; everything else is literal and
/// case-insensitive. See [`crate::services::exclusion`] for match semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExclusionRule {
    pub id: String,
    pub pattern: String,
    pub enabled: bool,
}

/// Options controlling how accepted files are formatted when combined.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProcessingOptions {
    pub include_file_names: bool,
    pub include_timestamp: bool,
    pub enable_preprocessing: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            include_file_names: true,
            include_timestamp: false,
            enable_preprocessing: false,
        }
    }
}

/// Validation failures for settings mutators.
///
/// A rejected mutation leaves the settings unchanged; none of these are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Extension must not be empty")]
    EmptyExtension,

    #[error("Extension must start with a dot (.)")]
    MissingLeadingDot,

    #[error("MIME type must not be empty")]
    EmptyMimeType,

    #[error("Exclusion pattern must not be empty")]
    EmptyPattern,
}

/// The complete user configuration: built-in file type toggles, custom types,
/// exclusion rules, and processing options.
///
/// All mutators are synchronous, pure state transitions. Persistence is a
/// separate concern handled by [`crate::config::SettingsStore`] via
/// [`crate::state::Session`], which writes back each field after a successful
/// mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub file_types: Vec<FileTypeRule>,
    pub custom_file_types: Vec<CustomFileType>,
    pub exclusion_rules: Vec<ExclusionRule>,
    pub options: ProcessingOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_types: default_file_types(),
            custom_file_types: Vec::new(),
            exclusion_rules: default_exclusion_rules(),
            options: ProcessingOptions::default(),
        }
    }
}

impl Settings {
    /// Flip the enabled flag of the matching built-in rule.
    ///
    /// Unknown extensions are a no-op, not an error.
    ///
    /// # Returns
    /// `true` if a rule was toggled
    pub fn toggle_file_type(&mut self, extension: &str) -> bool {
        match self
            .file_types
            .iter_mut()
            .find(|rule| rule.extension == extension)
        {
            Some(rule) => {
                rule.enabled = !rule.enabled;
                tracing::debug!(
                    "Toggled file type {} -> enabled={}",
                    rule.extension,
                    rule.enabled
                );
                true
            }
            None => {
                tracing::debug!("Toggle ignored for unknown file type: {}", extension);
                false
            }
        }
    }

    /// Add a custom file type with a freshly generated id.
    ///
    /// # Errors
    /// [`ValidationError`] if the extension or MIME type is empty, or the
    /// extension does not start with a dot.
    pub fn add_custom_file_type(
        &mut self,
        extension: &str,
        mime_type: &str,
    ) -> Result<&CustomFileType, ValidationError> {
        if extension.is_empty() {
            return Err(ValidationError::EmptyExtension);
        }
        if mime_type.is_empty() {
            return Err(ValidationError::EmptyMimeType);
        }
        if !extension.starts_with('.') {
            return Err(ValidationError::MissingLeadingDot);
        }

        self.custom_file_types.push(CustomFileType {
            id: Uuid::new_v4().to_string(),
            extension: extension.to_string(),
            mime_type: mime_type.to_string(),
        });

        let added = self
            .custom_file_types
            .last()
            .expect("custom type was just pushed");
        tracing::info!("Added custom file type {} ({})", added.extension, added.id);
        Ok(added)
    }

    /// Remove the custom file type with the given id. Idempotent.
    ///
    /// # Returns
    /// `true` if an entry was removed
    pub fn remove_custom_file_type(&mut self, id: &str) -> bool {
        let before = self.custom_file_types.len();
        self.custom_file_types.retain(|custom| custom.id != id);
        before != self.custom_file_types.len()
    }

    /// Add an enabled exclusion rule with a freshly generated id.
    ///
    /// The pattern is trimmed before it is stored.
    ///
    /// # Errors
    /// [`ValidationError::EmptyPattern`] if the pattern is empty or
    /// whitespace-only.
    pub fn add_exclusion_rule(&mut self, pattern: &str) -> Result<&ExclusionRule, ValidationError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(ValidationError::EmptyPattern);
        }

        self.exclusion_rules.push(ExclusionRule {
            id: Uuid::new_v4().to_string(),
            pattern: pattern.to_string(),
            enabled: true,
        });

        let added = self
            .exclusion_rules
            .last()
            .expect("exclusion rule was just pushed");
        tracing::info!("Added exclusion rule \"{}\" ({})", added.pattern, added.id);
        Ok(added)
    }

    /// Remove the exclusion rule with the given id. Idempotent.
    ///
    /// # Returns
    /// `true` if a rule was removed
    pub fn remove_exclusion_rule(&mut self, id: &str) -> bool {
        let before = self.exclusion_rules.len();
        self.exclusion_rules.retain(|rule| rule.id != id);
        before != self.exclusion_rules.len()
    }

    /// Flip the enabled flag of the exclusion rule with the given id.
    /// No-op on unknown ids.
    ///
    /// # Returns
    /// `true` if a rule was toggled
    pub fn toggle_exclusion_rule(&mut self, id: &str) -> bool {
        match self.exclusion_rules.iter_mut().find(|rule| rule.id == id) {
            Some(rule) => {
                rule.enabled = !rule.enabled;
                true
            }
            None => false,
        }
    }

    /// Replace all four fields with the built-in defaults.
    pub fn reset_to_defaults(&mut self) {
        *self = Settings::default();
        tracing::info!("Settings reset to defaults");
    }

    /// Count of enabled built-in rules plus all custom types
    /// (custom types are always enabled).
    pub fn enabled_type_count(&self) -> usize {
        self.file_types.iter().filter(|rule| rule.enabled).count() + self.custom_file_types.len()
    }

    /// Count of exclusion rules that are currently enabled.
    pub fn active_exclusion_count(&self) -> usize {
        self.exclusion_rules.iter().filter(|rule| rule.enabled).count()
    }
}

/// The default catalog of supported file types, all enabled.
pub fn default_file_types() -> Vec<FileTypeRule> {
    vec![
        FileTypeRule::enabled(".txt", &["text/plain"]),
        FileTypeRule::enabled(".js", &["application/javascript", "text/javascript"]),
        FileTypeRule::enabled(".ts", &["text/typescript"]),
        FileTypeRule::enabled(".jsx", &["text/jsx"]),
        FileTypeRule::enabled(".tsx", &["text/tsx"]),
        FileTypeRule::enabled(".css", &["text/css"]),
        FileTypeRule::enabled(".json", &["application/json"]),
        FileTypeRule::enabled(".md", &["text/markdown"]),
        FileTypeRule::enabled(".py", &["text/x-python"]),
        FileTypeRule::enabled(".java", &["text/x-java-source"]),
        FileTypeRule::enabled(".cpp", &["text/x-c++src"]),
        FileTypeRule::enabled(".c", &["text/x-csrc"]),
        FileTypeRule::enabled(".php", &["text/x-php"]),
        FileTypeRule::enabled(".rb", &["text/x-ruby"]),
        FileTypeRule::enabled(".go", &["text/x-go"]),
        FileTypeRule::enabled(".rs", &["text/x-rust"]),
        FileTypeRule::enabled(".swift", &["text/x-swift"]),
        FileTypeRule::enabled(".kt", &["text/x-kotlin"]),
        FileTypeRule::enabled(".scala", &["text/x-scala"]),
        FileTypeRule::enabled(".html", &["text/html"]),
        FileTypeRule::enabled(".xml", &["text/xml", "application/xml"]),
        FileTypeRule::enabled(".yml", &["text/yaml"]),
        FileTypeRule::enabled(".yaml", &["text/yaml"]),
        FileTypeRule::enabled(".toml", &["text/x-toml"]),
        FileTypeRule::enabled(".ini", &["text/plain"]),
        FileTypeRule::enabled(".conf", &["text/plain"]),
        FileTypeRule::enabled(".sh", &["text/x-shellscript"]),
        FileTypeRule::enabled(".bat", &["text/plain"]),
        FileTypeRule::enabled(".ps1", &["text/plain"]),
        FileTypeRule::enabled(".sql", &["text/x-sql"]),
    ]
}

/// The default exclusion rule set, all enabled.
pub fn default_exclusion_rules() -> Vec<ExclusionRule> {
    let patterns = ["*.test.*", "*.spec.*", "node_modules/*", ".git/*"];
    patterns
        .iter()
        .enumerate()
        .map(|(index, pattern)| ExclusionRule {
            id: (index + 1).to_string(),
            pattern: pattern.to_string(),
            enabled: true,
        })
        .collect()
}
