use std::collections::BTreeMap;
use std::fs;
use std::ops::Bound;
use std::path::Path;

use tracing::{debug, warn};

use super::skk_format::{format_line, parse_line, ParseStats};
use super::{Dict, DictError, ReferOption, Word};

/// Editable SKK dictionary: reading → words in preference order.
///
/// Backs the user dictionary. Read-only sources are frozen into a
/// [`TrieDict`](super::TrieDict) instead.
#[derive(Debug, Clone, Default)]
pub struct MemoryDict {
    id: String,
    entries: BTreeMap<String, Vec<Word>>,
    save_to_user_dict: bool,
}

impl MemoryDict {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: BTreeMap::new(),
            save_to_user_dict: true,
        }
    }

    /// Parse SKK source text. Comment lines (`;`) and blank lines are
    /// ignored; malformed lines are skipped and counted.
    pub fn parse(id: impl Into<String>, source: &str) -> (Self, ParseStats) {
        let mut dict = Self::new(id);
        let mut stats = ParseStats::default();
        for (lineno, line) in source.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with(';') {
                continue;
            }
            match parse_line(line, &dict.id) {
                Some((yomi, words)) => {
                    dict.entries.insert(yomi, words);
                    stats.entries += 1;
                }
                None => {
                    debug!(dict = %dict.id, line = lineno + 1, "skipping malformed line");
                    stats.skipped += 1;
                }
            }
        }
        if stats.skipped > 0 {
            warn!(dict = %dict.id, skipped = stats.skipped, "dictionary had malformed lines");
        }
        (dict, stats)
    }

    /// Load a UTF-8 SKK dictionary file.
    pub fn load(path: &Path, id: impl Into<String>) -> Result<(Self, ParseStats), DictError> {
        let bytes = fs::read(path)?;
        let source = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            DictError::Encoding {
                line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            }
        })?;
        Ok(Self::parse(id, &source))
    }

    /// Open a dictionary file, returning an empty one if it doesn't exist.
    pub fn open(path: &Path, id: impl Into<String>) -> Result<Self, DictError> {
        let id = id.into();
        match Self::load(path, id.clone()) {
            Ok((dict, _)) => Ok(dict),
            Err(DictError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::new(id))
            }
            Err(e) => Err(e),
        }
    }

    pub fn with_save_to_user_dict(mut self, save: bool) -> Self {
        self.save_to_user_dict = save;
        self
    }

    /// Put `word` at the front of `yomi`'s list. An existing entry for the
    /// same word is moved, keeping its annotation when `word` has none.
    pub fn add(&mut self, yomi: &str, word: Word) {
        let words = self.entries.entry(yomi.to_string()).or_default();
        let previous = words
            .iter()
            .position(|w| w.word == word.word)
            .map(|i| words.remove(i));
        let annotation = word
            .annotation
            .or_else(|| previous.and_then(|p| p.annotation));
        words.insert(
            0,
            Word {
                word: word.word,
                annotation,
            },
        );
    }

    /// Remove `word` from `yomi`. Returns whether it existed.
    pub fn delete(&mut self, yomi: &str, word: &str) -> bool {
        let Some(words) = self.entries.get_mut(yomi) else {
            return false;
        };
        let before = words.len();
        words.retain(|w| w.word != word);
        let removed = words.len() < before;
        if words.is_empty() {
            self.entries.remove(yomi);
        }
        removed
    }

    pub fn get(&self, yomi: &str) -> Option<&[Word]> {
        self.entries.get(yomi).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All `(reading, words)` pairs, sorted by reading.
    pub fn entries(&self) -> Vec<(&str, &[Word])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, Vec<Word>)> {
        self.entries.into_iter()
    }

    /// Serialize in SKK format, sorted by reading.
    pub fn to_skk_string(&self) -> String {
        let mut out = String::new();
        for (yomi, words) in self.entries() {
            out.push_str(&format_line(yomi, words));
            out.push('\n');
        }
        out
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, self.to_skk_string())?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl Dict for MemoryDict {
    fn id(&self) -> &str {
        &self.id
    }

    fn refer(&self, yomi: &str, option: Option<ReferOption>) -> Vec<Word> {
        self.entries
            .get(&ReferOption::key(option, yomi))
            .cloned()
            .unwrap_or_default()
    }

    fn readings_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .range::<str, _>((Bound::Excluded(prefix), Bound::Unbounded))
            .map(|(k, _)| k)
            .take_while(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn save_to_user_dict(&self) -> bool {
        self.save_to_user_dict
    }
}
