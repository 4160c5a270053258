//! Dictionary storage and the lookup contract used by the session.
//!
//! `Dict` is a single source of words (a parsed SKK file, the user's own
//! entries). `Dictionary` is what the state machine talks to: it produces
//! ready-to-display `Candidate`s and accepts registrations.

mod memory_dict;
mod skk_format;
mod trie_dict;
#[cfg(test)]
mod tests;

pub use memory_dict::MemoryDict;
pub use skk_format::{decode_word, encode_word, parse_line, ParseStats};
pub use trie_dict::TrieDict;

use std::io;

use serde::Serialize;

use crate::candidate::Candidate;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("dictionary is not valid UTF-8 (line {line})")]
    Encoding { line: usize },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Free-text note attached to a word, tagged with the dictionary it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Annotation {
    pub dict_id: String,
    pub text: String,
}

/// One dictionary word for a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    pub word: String,
    pub annotation: Option<Annotation>,
}

impl Word {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            annotation: None,
        }
    }

    pub fn with_annotation(word: impl Into<String>, annotation: Annotation) -> Self {
        Self {
            word: word.into(),
            annotation: Some(annotation),
        }
    }
}

/// Which side of an affix entry to search.
///
/// SKK stores prefixes as `あき>` and suffixes as `>てき`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferOption {
    Prefix,
    Suffix,
}

impl ReferOption {
    /// Dictionary key for `yomi` under this option.
    pub fn key(option: Option<Self>, yomi: &str) -> String {
        match option {
            None => yomi.to_string(),
            Some(Self::Prefix) => format!("{yomi}>"),
            Some(Self::Suffix) => format!(">{yomi}"),
        }
    }
}

/// A source of words keyed by reading.
pub trait Dict: Send + Sync {
    /// Identifier used to tag annotations.
    fn id(&self) -> &str;

    /// Words for `yomi` in preference order.
    fn refer(&self, yomi: &str, option: Option<ReferOption>) -> Vec<Word>;

    /// All readings that start with `prefix` (excluding `prefix` itself).
    fn readings_with_prefix(&self, prefix: &str) -> Vec<String>;

    /// Whether words from this source may be copied into the user dictionary.
    fn save_to_user_dict(&self) -> bool {
        true
    }
}

/// Lookup and registration contract consumed by the state machine.
///
/// Implementations synchronize internally; all methods take `&self`.
pub trait Dictionary: Send + Sync {
    /// Candidates for `yomi` in preference order.
    fn refer(&self, yomi: &str, option: Option<ReferOption>) -> Vec<Candidate>;

    /// Record `word` as the most preferred word for `yomi`.
    fn add(&self, yomi: &str, word: Word);

    /// Remove `word` from `yomi`. Returns whether it existed.
    fn delete(&self, yomi: &str, word: &str) -> bool;

    /// Shortest known reading longer than `prefix`, if any.
    fn find_completion(&self, _prefix: &str) -> Option<String> {
        None
    }
}
