use std::path::Path;

use lexime_trie::{DoubleArray, TrieSearch};

use super::skk_format::ParseStats;
use super::{Dict, DictError, MemoryDict, ReferOption, Word};

/// Read-only dictionary indexed by a double-array trie over readings.
///
/// Source dictionaries are built once and never edited, so their readings
/// live in a `DoubleArray` for exact and predictive lookups; the words sit
/// in `values`, indexed by the trie's value id.
pub struct TrieDict {
    id: String,
    trie: DoubleArray<u8>,
    values: Vec<Vec<Word>>,
    save_to_user_dict: bool,
}

impl TrieDict {
    pub fn from_entries(
        id: impl Into<String>,
        entries: impl IntoIterator<Item = (String, Vec<Word>)>,
    ) -> Self {
        let mut pairs: Vec<(String, Vec<Word>)> = entries.into_iter().collect();
        pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        pairs.dedup_by(|a, b| a.0 == b.0);

        let keys: Vec<&[u8]> = pairs.iter().map(|(r, _)| r.as_bytes()).collect();
        let trie = DoubleArray::<u8>::build(&keys);
        let values = pairs.into_iter().map(|(_, v)| v).collect();
        Self {
            id: id.into(),
            trie,
            values,
            save_to_user_dict: true,
        }
    }

    /// Load a UTF-8 SKK dictionary file and index it.
    pub fn load(path: &Path, id: impl Into<String>) -> Result<(Self, ParseStats), DictError> {
        let (dict, stats) = MemoryDict::load(path, id)?;
        Ok((Self::from(dict), stats))
    }

    pub fn with_save_to_user_dict(mut self, save: bool) -> Self {
        self.save_to_user_dict = save;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<MemoryDict> for TrieDict {
    fn from(dict: MemoryDict) -> Self {
        let save = dict.save_to_user_dict();
        let id = dict.id().to_string();
        Self::from_entries(id, dict.into_entries()).with_save_to_user_dict(save)
    }
}

impl Dict for TrieDict {
    fn id(&self) -> &str {
        &self.id
    }

    fn refer(&self, yomi: &str, option: Option<ReferOption>) -> Vec<Word> {
        self.trie
            .exact_match(ReferOption::key(option, yomi).as_bytes())
            .map(|id| self.values[id as usize].clone())
            .unwrap_or_default()
    }

    fn readings_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.trie
            .predictive_search(prefix.as_bytes())
            .filter(|m| m.key.len() > prefix.len())
            .filter_map(|m| String::from_utf8(m.key).ok())
            .collect()
    }

    fn save_to_user_dict(&self) -> bool {
        self.save_to_user_dict
    }
}
