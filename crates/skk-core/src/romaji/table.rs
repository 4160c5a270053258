use std::collections::BTreeMap;
use std::sync::OnceLock;

use lexime_trie::{DoubleArray, TrieSearch};

use super::config::{parse_romaji_toml, RomajiConfigError};

/// Embedded default romaji mappings (`[mappings]` TOML table).
pub(super) const DEFAULT_TOML: &str = include_str!("default_romaji.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, PartialEq)]
pub enum LookupResult {
    None,
    Prefix,
    Exact(String),
    ExactAndPrefix(String),
}

/// Romaji → kana mappings in a byte-keyed double-array trie.
pub struct RomajiTable {
    da: DoubleArray<u8>,
    kana: Vec<String>,
}

impl RomajiTable {
    /// Install a user table. Only takes effect before the first `global()`.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiConfigError> {
        parse_romaji_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiConfigError::AlreadyInitialized)
    }

    /// The process-wide table: the custom one if installed, else the default.
    pub fn global() -> &'static RomajiTable {
        static INSTANCE: OnceLock<RomajiTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            // init_custom already validated anything that reaches here
            let map = parse_romaji_toml(toml_str).expect("romaji TOML must be valid");
            RomajiTable::from_map(map)
        })
    }

    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        // BTreeMap iterates in byte order, which build() requires
        let keys: Vec<&[u8]> = map.keys().map(|r| r.as_bytes()).collect();
        let da = DoubleArray::<u8>::build(&keys);
        let kana = map.into_values().collect();
        Self { da, kana }
    }

    pub fn len(&self) -> usize {
        self.kana.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kana.is_empty()
    }

    pub fn lookup(&self, romaji: &str) -> LookupResult {
        let pr = self.da.probe(romaji.as_bytes());
        match (pr.value, pr.has_children) {
            (None, false) => LookupResult::None,
            (None, true) => LookupResult::Prefix,
            (Some(id), false) => LookupResult::Exact(self.kana[id as usize].clone()),
            (Some(id), true) => LookupResult::ExactAndPrefix(self.kana[id as usize].clone()),
        }
    }

    /// True when some key strictly extends `romaji`.
    pub fn has_longer_key(&self, romaji: &str) -> bool {
        self.da.probe(romaji.as_bytes()).has_children
    }
}
