//! Romaji-to-kana transliteration.
//!
//! A sorted table maps ASCII fragments to kana. `convert` consumes one
//! fragment at a time and reports at most one completed unit, handling
//! sokuon (っ) and hatsuon (ん).

mod config;
mod convert;
mod table;

pub use config::{parse_romaji_toml, RomajiConfigError};
pub use convert::{convert, convert_with, flush, is_prefix, Converted, Moji};
pub use table::{LookupResult, RomajiTable};

/// Returns the embedded default romaji TOML content.
pub fn default_toml() -> &'static str {
    table::DEFAULT_TOML
}
