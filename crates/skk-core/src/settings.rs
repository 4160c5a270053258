//! Global settings loaded from TOML, following the same OnceLock pattern as romaji config.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Digit keys 1-9 select from a page, so a page cannot hold more.
pub const MAX_DISPLAY_COUNT: usize = 9;

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
    pub candidates: CandidateSettings,
    pub dictionary: DictionarySettings,
    #[serde(default)]
    pub date_conversions: Vec<DateConversion>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CandidateSettings {
    pub inline_count: usize,
    pub display_count: usize,
}

impl Default for CandidateSettings {
    fn default() -> Self {
        Self {
            inline_count: 3,
            display_count: 9,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DictionarySettings {
    #[serde(default)]
    pub private_mode: bool,
    #[serde(default)]
    pub ignore_user_dict_in_private_mode: bool,
    #[serde(default)]
    pub find_completion_from_all_dicts: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateConversion {
    /// `time` format description, e.g. `[year]/[month]/[day]`.
    pub format: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_range {
        ($section:ident . $field:ident, $range:expr) => {
            if !$range.contains(&s.$section.$field) {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: format!("must be in {:?}", $range),
                });
            }
        };
    }

    check_range!(candidates.display_count, 1..=MAX_DISPLAY_COUNT);
    check_range!(candidates.inline_count, 0..=100);

    for (i, conv) in s.date_conversions.iter().enumerate() {
        if let Err(e) = time::format_description::parse(&conv.format) {
            return Err(SettingsError::InvalidValue {
                field: format!("date_conversions[{i}].format"),
                reason: e.to_string(),
            });
        }
    }

    Ok(())
}
