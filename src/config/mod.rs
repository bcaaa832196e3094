use crate::models::{
    CustomFileType, ExclusionRule, FileTypeRule, ProcessingOptions, Settings,
};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;

/// Persisted key for the built-in file type rules.
pub const KEY_FILE_TYPES: &str = "file_types";
/// Persisted key for user-defined file types.
pub const KEY_CUSTOM_FILE_TYPES: &str = "custom_file_types";
/// Persisted key for exclusion rules.
pub const KEY_EXCLUSION_RULES: &str = "exclusion_rules";
/// Persisted keys for the three processing option booleans.
pub const KEY_INCLUDE_FILE_NAMES: &str = "include_file_names";
pub const KEY_INCLUDE_TIMESTAMP: &str = "include_timestamp";
pub const KEY_ENABLE_PREPROCESSING: &str = "enable_preprocessing";

/// Durable key/value store for settings, one YAML file per key.
///
/// Each persisted field is independently readable and writable, so a crash
/// between two writes leaves at worst a stale file for one key. Loading
/// tolerates that: any missing or unparseable value falls back to the built-in
/// default for that key alone and never fails the whole load.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    store_dir: Utf8PathBuf,
}

impl SettingsStore {
    /// Create a store rooted at the given directory, creating it if needed.
    ///
    /// # Arguments
    /// * `store_dir` - Directory holding the per-key YAML files
    pub fn new<P: AsRef<Utf8Path>>(store_dir: P) -> Result<Self> {
        let store_dir = store_dir.as_ref().to_path_buf();

        if !store_dir.exists() {
            fs::create_dir_all(&store_dir)
                .with_context(|| format!("Failed to create settings directory: {}", store_dir))?;
        }

        Ok(Self { store_dir })
    }

    fn key_path(&self, key: &str) -> Utf8PathBuf {
        self.store_dir.join(format!("{}.yaml", key))
    }

    /// Load one key, substituting the supplied default on any failure.
    fn load_key<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.key_path(key);
        if !path.exists() {
            tracing::debug!("No persisted value for {}, using default", key);
            return default;
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}, using default", path, e);
                return default;
            }
        };

        match serde_yaml_ng::from_str(&contents) {
            Ok(value) => {
                tracing::debug!("Loaded {} from {}", key, path);
                value
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}, using default", path, e);
                default
            }
        }
    }

    fn save_key<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.key_path(key);
        let yaml_string = serde_yaml_ng::to_string(value)
            .with_context(|| format!("Failed to serialize {} to YAML", key))?;

        fs::write(&path, yaml_string).with_context(|| format!("Failed to write {}", path))?;

        tracing::debug!("Saved {} to {}", key, path);
        Ok(())
    }

    /// Load the complete settings aggregate with per-field default fallback.
    ///
    /// Never fails: a corrupt or missing file affects only its own field.
    pub fn load_settings(&self) -> Settings {
        let defaults = Settings::default();
        let settings = Settings {
            file_types: self.load_key(KEY_FILE_TYPES, defaults.file_types),
            custom_file_types: self.load_key(KEY_CUSTOM_FILE_TYPES, defaults.custom_file_types),
            exclusion_rules: self.load_key(KEY_EXCLUSION_RULES, defaults.exclusion_rules),
            options: ProcessingOptions {
                include_file_names: self
                    .load_key(KEY_INCLUDE_FILE_NAMES, defaults.options.include_file_names),
                include_timestamp: self
                    .load_key(KEY_INCLUDE_TIMESTAMP, defaults.options.include_timestamp),
                enable_preprocessing: self.load_key(
                    KEY_ENABLE_PREPROCESSING,
                    defaults.options.enable_preprocessing,
                ),
            },
        };

        tracing::info!(
            "Loaded settings from {}: {} file types, {} custom types, {} exclusion rules",
            self.store_dir,
            settings.file_types.len(),
            settings.custom_file_types.len(),
            settings.exclusion_rules.len()
        );
        settings
    }

    /// Persist the built-in file type rules.
    pub fn save_file_types(&self, file_types: &[FileTypeRule]) -> Result<()> {
        self.save_key(KEY_FILE_TYPES, &file_types)
    }

    /// Persist the custom file types.
    pub fn save_custom_file_types(&self, custom_file_types: &[CustomFileType]) -> Result<()> {
        self.save_key(KEY_CUSTOM_FILE_TYPES, &custom_file_types)
    }

    /// Persist the exclusion rules.
    pub fn save_exclusion_rules(&self, exclusion_rules: &[ExclusionRule]) -> Result<()> {
        self.save_key(KEY_EXCLUSION_RULES, &exclusion_rules)
    }

    /// Persist the three processing option booleans, each under its own key.
    pub fn save_options(&self, options: &ProcessingOptions) -> Result<()> {
        self.save_key(KEY_INCLUDE_FILE_NAMES, &options.include_file_names)?;
        self.save_key(KEY_INCLUDE_TIMESTAMP, &options.include_timestamp)?;
        self.save_key(KEY_ENABLE_PREPROCESSING, &options.enable_preprocessing)
    }

    /// Persist every field of the aggregate.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.save_file_types(&settings.file_types)?;
        self.save_custom_file_types(&settings.custom_file_types)?;
        self.save_exclusion_rules(&settings.exclusion_rules)?;
        self.save_options(&settings.options)
    }

    /// Get the store directory path.
    pub fn store_dir(&self) -> &Utf8Path {
        &self.store_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (SettingsStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let store = SettingsStore::new(&store_path).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_create_store() {
        let (_store, _temp_dir) = create_test_store();
    }

    #[test]
    fn test_load_without_files_yields_defaults() {
        let (store, _temp_dir) = create_test_store();
        let settings = store.load_settings();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (store, _temp_dir) = create_test_store();

        let mut settings = Settings::default();
        settings.toggle_file_type(".txt");
        settings.add_custom_file_type(".custom", "text/plain").unwrap();
        settings.add_exclusion_rule("*.log").unwrap();
        settings.options.include_timestamp = true;

        store.save_settings(&settings).unwrap();
        let loaded = store.load_settings();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_corrupt_key_falls_back_to_default() {
        let (store, _temp_dir) = create_test_store();

        let mut settings = Settings::default();
        settings.add_exclusion_rule("*.log").unwrap();
        store.save_settings(&settings).unwrap();

        // Clobber one key; only that field should fall back
        fs::write(store.key_path(KEY_EXCLUSION_RULES), "{ not: [valid").unwrap();

        let loaded = store.load_settings();
        assert_eq!(loaded.exclusion_rules, Settings::default().exclusion_rules);
        assert_eq!(loaded.file_types, settings.file_types);
    }

    #[test]
    fn test_option_keys_are_independent_files() {
        let (store, _temp_dir) = create_test_store();

        let mut options = ProcessingOptions::default();
        options.enable_preprocessing = true;
        store.save_options(&options).unwrap();

        assert!(store.key_path(KEY_INCLUDE_FILE_NAMES).exists());
        assert!(store.key_path(KEY_INCLUDE_TIMESTAMP).exists());
        assert!(store.key_path(KEY_ENABLE_PREPROCESSING).exists());

        let loaded = store.load_settings();
        assert!(loaded.options.enable_preprocessing);
        assert!(loaded.options.include_file_names);
    }
}
