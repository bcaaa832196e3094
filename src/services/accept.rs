use crate::models::Settings;
use indexmap::IndexMap;

/// Build the MIME type → extensions map that the intake boundary uses to
/// restrict its file picker or drop target.
///
/// Every enabled built-in rule contributes its extension under each of its
/// declared MIME types, followed by every custom type. Extensions are appended
/// in rule declaration order and deliberately not deduplicated; a MIME type
/// shared by several rules aggregates all of their extensions.
///
/// This is a pure function of the settings and must be recomputed whenever
/// they change. The result is advisory, UI-level filtering only — exclusion
/// rules are the engine's own policy check.
pub fn build_accept_spec(settings: &Settings) -> IndexMap<String, Vec<String>> {
    let mut accept: IndexMap<String, Vec<String>> = IndexMap::new();

    for rule in settings.file_types.iter().filter(|rule| rule.enabled) {
        for mime_type in &rule.mime_types {
            accept
                .entry(mime_type.clone())
                .or_default()
                .push(rule.extension.clone());
        }
    }

    for custom in &settings.custom_file_types {
        accept
            .entry(custom.mime_type.clone())
            .or_default()
            .push(custom.extension.clone());
    }

    accept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregates_extensions_per_mime_type() {
        let settings = Settings::default();
        let accept = build_accept_spec(&settings);

        // .txt, .ini, .conf, .bat, .ps1 all declare text/plain, in catalog order
        assert_eq!(
            accept.get("text/plain").unwrap(),
            &vec![".txt", ".ini", ".conf", ".bat", ".ps1"]
        );
        // .yml and .yaml share text/yaml
        assert_eq!(accept.get("text/yaml").unwrap(), &vec![".yml", ".yaml"]);
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let mut settings = Settings::default();
        settings.toggle_file_type(".rs");

        let accept = build_accept_spec(&settings);
        assert!(!accept.contains_key("text/x-rust"));
    }

    #[test]
    fn test_custom_types_always_included() {
        let mut settings = Settings::default();
        settings.add_custom_file_type(".custom", "text/plain").unwrap();

        let accept = build_accept_spec(&settings);
        let plain = accept.get("text/plain").unwrap();
        assert_eq!(plain.last().unwrap(), ".custom");
    }

    #[test]
    fn test_empty_settings_yield_empty_map() {
        let settings = Settings {
            file_types: Vec::new(),
            custom_file_types: Vec::new(),
            exclusion_rules: Vec::new(),
            options: Default::default(),
        };
        assert!(build_accept_spec(&settings).is_empty());
    }
}
