//! Session state - single owner of the settings and the combined document.
//!
//! The session is the one place mutation happens. Every settings mutator
//! validates, applies the change in memory, and then writes the affected keys
//! through the [`SettingsStore`]. A persistence failure is logged and
//! swallowed; the in-memory change stands either way, so the running program
//! never loses work to a full disk. The engine is single-threaded, so there
//! is no interior locking here.

use crate::config::SettingsStore;
use crate::models::{
    CombinedDocument, CustomFileType, DocumentStats, ExclusionRule, Settings, ValidationError,
};
use crate::services::{BatchFile, CombineError, CombineReport, Combiner, build_accept_spec};
use anyhow::Result;
use indexmap::IndexMap;

/// Owns the mutable state of one run of the engine.
pub struct Session {
    settings: Settings,
    document: CombinedDocument,
    combiner: Combiner,
    store: Option<SettingsStore>,
}

impl Session {
    /// In-memory session with default settings and no persistence.
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            document: CombinedDocument::new(),
            combiner: Combiner::new(),
            store: None,
        }
    }

    /// Session backed by a store, hydrated from whatever it holds.
    ///
    /// Loading never fails; missing or corrupt keys fall back to defaults
    /// per field inside [`SettingsStore::load_settings`].
    pub fn load(store: SettingsStore) -> Self {
        let settings = store.load_settings();
        Self {
            settings,
            document: CombinedDocument::new(),
            combiner: Combiner::new(),
            store: Some(store),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn document(&self) -> &CombinedDocument {
        &self.document
    }

    /// Run one save closure against the store, logging instead of failing.
    fn persist<F>(&self, what: &str, save: F)
    where
        F: FnOnce(&SettingsStore) -> Result<()>,
    {
        if let Some(store) = &self.store {
            if let Err(e) = save(store) {
                tracing::warn!("Failed to persist {}: {:#}", what, e);
            }
        }
    }

    // --- Settings mutators ---

    /// Flip one built-in file type rule. Returns false if the extension is
    /// unknown, in which case nothing is written.
    pub fn toggle_file_type(&mut self, extension: &str) -> bool {
        if !self.settings.toggle_file_type(extension) {
            return false;
        }
        self.persist("file types", |store| {
            store.save_file_types(&self.settings.file_types)
        });
        true
    }

    /// Validate and add a custom file type, returning the stored rule.
    ///
    /// # Errors
    /// [`ValidationError`] when the extension or MIME type fails validation;
    /// nothing is added or written in that case.
    pub fn add_custom_file_type(
        &mut self,
        extension: &str,
        mime_type: &str,
    ) -> Result<CustomFileType, ValidationError> {
        let added = self
            .settings
            .add_custom_file_type(extension, mime_type)?
            .clone();
        self.persist("custom file types", |store| {
            store.save_custom_file_types(&self.settings.custom_file_types)
        });
        Ok(added)
    }

    /// Remove a custom file type by id. Unknown ids are a no-op.
    pub fn remove_custom_file_type(&mut self, id: &str) -> bool {
        if !self.settings.remove_custom_file_type(id) {
            return false;
        }
        self.persist("custom file types", |store| {
            store.save_custom_file_types(&self.settings.custom_file_types)
        });
        true
    }

    /// Validate and add an exclusion rule, returning the stored rule.
    ///
    /// # Errors
    /// [`ValidationError::EmptyPattern`] when the trimmed pattern is empty.
    pub fn add_exclusion_rule(&mut self, pattern: &str) -> Result<ExclusionRule, ValidationError> {
        let added = self.settings.add_exclusion_rule(pattern)?.clone();
        self.persist("exclusion rules", |store| {
            store.save_exclusion_rules(&self.settings.exclusion_rules)
        });
        Ok(added)
    }

    /// Remove an exclusion rule by id. Unknown ids are a no-op.
    pub fn remove_exclusion_rule(&mut self, id: &str) -> bool {
        if !self.settings.remove_exclusion_rule(id) {
            return false;
        }
        self.persist("exclusion rules", |store| {
            store.save_exclusion_rules(&self.settings.exclusion_rules)
        });
        true
    }

    /// Flip one exclusion rule. Returns false if the id is unknown.
    pub fn toggle_exclusion_rule(&mut self, id: &str) -> bool {
        if !self.settings.toggle_exclusion_rule(id) {
            return false;
        }
        self.persist("exclusion rules", |store| {
            store.save_exclusion_rules(&self.settings.exclusion_rules)
        });
        true
    }

    pub fn set_include_file_names(&mut self, enabled: bool) {
        self.settings.options.include_file_names = enabled;
        self.persist("options", |store| store.save_options(&self.settings.options));
    }

    pub fn set_include_timestamp(&mut self, enabled: bool) {
        self.settings.options.include_timestamp = enabled;
        self.persist("options", |store| store.save_options(&self.settings.options));
    }

    pub fn set_enable_preprocessing(&mut self, enabled: bool) {
        self.settings.options.enable_preprocessing = enabled;
        self.persist("options", |store| store.save_options(&self.settings.options));
    }

    /// Restore the factory defaults for every settings field and persist the
    /// full aggregate. The combined document is left alone.
    pub fn reset_to_defaults(&mut self) {
        self.settings.reset_to_defaults();
        self.persist("settings", |store| store.save_settings(&self.settings));
        tracing::info!("Settings reset to defaults");
    }

    // --- Document operations ---

    /// Combine one batch of files into the document under the current
    /// settings, returning what was accepted and what was excluded.
    pub fn intake(&mut self, batch: &[BatchFile]) -> CombineReport {
        self.combiner
            .intake(&mut self.document, batch, &self.settings)
    }

    /// Empty the combined document. Settings are untouched.
    pub fn clear_document(&mut self) {
        self.combiner.clear(&mut self.document);
    }

    /// Document text for the clipboard boundary.
    ///
    /// # Errors
    /// [`CombineError::EmptyContent`] when there is nothing worth copying.
    pub fn copy_text(&self) -> Result<&str, CombineError> {
        crate::services::copy_text(&self.document)
    }

    // --- Derived views ---

    /// MIME type → extensions map for file-picker filtering.
    pub fn accept_spec(&self) -> IndexMap<String, Vec<String>> {
        build_accept_spec(&self.settings)
    }

    pub fn enabled_type_count(&self) -> usize {
        self.settings.enabled_type_count()
    }

    pub fn active_exclusion_count(&self) -> usize {
        self.settings.active_exclusion_count()
    }

    pub fn stats(&self) -> DocumentStats {
        self.document.stats()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
