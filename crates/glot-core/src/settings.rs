//! Engine-wide settings loaded from TOML into a process-wide singleton.
//!
//! - `init_custom(toml_content)` installs a custom TOML before the first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Defaults are embedded via `include_str!("default_settings.toml")` and checked by build.rs

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub patterns: PatternSettings,
    pub pronunciation: PronunciationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatternSettings {
    pub backtrack_limit: usize,
    pub size_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PronunciationSettings {
    pub max_recursion_passes: usize,
    pub syllable_separator: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(patterns.backtrack_limit);
    check_positive_usize!(patterns.size_limit);
    check_positive_usize!(pronunciation.max_recursion_passes);

    if s.pronunciation.syllable_separator.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "pronunciation.syllable_separator".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.patterns.backtrack_limit, 1_000_000);
        assert_eq!(s.patterns.size_limit, 10 * 1024 * 1024);
        assert_eq!(s.pronunciation.max_recursion_passes, 100);
        assert_eq!(s.pronunciation.syllable_separator, "˙");
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[patterns]
backtrack_limit = 5000
size_limit = 4096

[pronunciation]
max_recursion_passes = 8
syllable_separator = "."
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.patterns.backtrack_limit, 5000);
        assert_eq!(s.pronunciation.max_recursion_passes, 8);
        assert_eq!(s.pronunciation.syllable_separator, ".");
    }

    #[test]
    fn error_zero_recursion_passes() {
        let toml = r#"
[patterns]
backtrack_limit = 5000
size_limit = 4096

[pronunciation]
max_recursion_passes = 0
syllable_separator = "."
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("pronunciation.max_recursion_passes"));
    }

    #[test]
    fn error_empty_separator() {
        let toml = r#"
[patterns]
backtrack_limit = 5000
size_limit = 4096

[pronunciation]
max_recursion_passes = 3
syllable_separator = ""
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("syllable_separator"));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[patterns]
backtrack_limit = 5000
size_limit = 4096
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("[patterns\nbacktrack_limit =").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn default_toml_accessor_matches_constant() {
        assert_eq!(default_toml(), DEFAULT_SETTINGS_TOML);
        assert!(default_toml().contains("[pronunciation]"));
    }
}
