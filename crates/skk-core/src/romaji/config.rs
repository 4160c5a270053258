//! User romaji tables.
//!
//! A table is a TOML file with a single `[mappings]` table of
//! `romaji = "hiragana"` pairs, e.g. `tsu = "つ"` or `"z." = "…"`. Only the
//! hiragana form is written; katakana and half-width kana are derived.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Single keys the state machine reads before the romaji table.
const MODE_KEYS: [&str; 4] = ["l", "q", "/", ";"];

#[derive(Deserialize)]
struct RomajiFile {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("invalid romaji TOML: {0}")]
    Parse(String),
    #[error("no romaji in [mappings]")]
    Empty,
    #[error("romaji must be ASCII: {0}")]
    NonAsciiKey(String),
    #[error("romaji must not contain whitespace: {0:?}")]
    WhitespaceKey(String),
    #[error("romaji {0:?} contains an uppercase letter, which starts a conversion instead")]
    UppercaseKey(String),
    #[error("{0:?} is an SKK mode key and cannot be mapped")]
    ModeKey(String),
    #[error("no kana given for {0:?}")]
    EmptyValue(String),
    #[error("romaji table already initialized")]
    AlreadyInitialized,
}

/// Parse and validate a romaji table, keyed by romaji in byte order.
pub fn parse_romaji_toml(toml_str: &str) -> Result<BTreeMap<String, String>, RomajiConfigError> {
    let file: RomajiFile =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;
    if file.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }
    for (romaji, kana) in &file.mappings {
        check_entry(romaji, kana)?;
    }
    Ok(file.mappings)
}

fn check_entry(romaji: &str, kana: &str) -> Result<(), RomajiConfigError> {
    let err = |make: fn(String) -> RomajiConfigError| Err(make(romaji.to_string()));
    if !romaji.is_ascii() {
        return err(RomajiConfigError::NonAsciiKey);
    }
    if romaji.is_empty() || romaji.chars().any(|c| c.is_ascii_whitespace()) {
        return err(RomajiConfigError::WhitespaceKey);
    }
    if romaji.chars().any(|c| c.is_ascii_uppercase()) {
        return err(RomajiConfigError::UppercaseKey);
    }
    if MODE_KEYS.contains(&romaji) {
        return err(RomajiConfigError::ModeKey);
    }
    if kana.is_empty() {
        return err(RomajiConfigError::EmptyValue);
    }
    Ok(())
}
