//! SKK kana-kanji conversion engine.
//!
//! `Engine` loads the dictionaries once and hands out independent
//! `StateMachine` sessions that share them. The conversion logic lives in
//! the `skk-core` (romaji, dictionaries, settings) and `skk-session` (state
//! machine) crates, re-exported here.

mod trace_init;


pub use skk_core;
pub use skk_session;
pub use trace_init::{init_tracing, FILTER_ENV, TRACE_FILE};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use skk_core::dict::{Dict, DictError, MemoryDict, TrieDict};
use skk_core::romaji::{RomajiConfigError, RomajiTable};
use skk_core::settings::{Settings, SettingsError};
use skk_core::user_dict::{UserDict, UserDictOptions, USER_DICT_ID};
use skk_session::{SessionConfig, StateMachine};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Dict { path: PathBuf, source: DictError },
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Romaji(#[from] RomajiConfigError),
}

pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Install a custom romaji table. Must run before the first conversion.
pub fn romaji_load_config(path: &Path) -> Result<(), EngineError> {
    RomajiTable::init_custom(read_config(path)?)?;
    Ok(())
}

/// Install custom settings. Must run before `Engine::open`.
pub fn settings_load_config(path: &Path) -> Result<(), EngineError> {
    skk_core::settings::init_custom(read_config(path)?)?;
    Ok(())
}

fn read_config(path: &Path) -> Result<String, EngineError> {
    fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub struct Engine {
    dictionary: Arc<UserDict>,
    config: SessionConfig,
}

impl Engine {
    /// `dicts` are source dictionaries in lookup order, after `user`.
    pub fn new(settings: &Settings, user: MemoryDict, dicts: Vec<Arc<dyn Dict>>) -> Self {
        Self {
            dictionary: Arc::new(UserDict::new(
                user,
                dicts,
                UserDictOptions::from_settings(settings),
            )),
            config: SessionConfig::from_settings(settings),
        }
    }

    /// Open with the global settings. See `open_with_settings`.
    pub fn open(user_dict: &Path, dicts: &[PathBuf]) -> Result<Self, EngineError> {
        Self::open_with_settings(skk_core::settings::settings(), user_dict, dicts)
    }

    /// Load the user dictionary (empty if the file does not exist yet) and
    /// every source dictionary. Sources are tagged with their file name.
    pub fn open_with_settings(
        settings: &Settings,
        user_dict: &Path,
        dicts: &[PathBuf],
    ) -> Result<Self, EngineError> {
        let user = MemoryDict::open(user_dict, USER_DICT_ID).map_err(|source| {
            EngineError::Dict {
                path: user_dict.to_path_buf(),
                source,
            }
        })?;
        let sources = load_sources(dicts)?;
        info!(
            user_entries = user.len(),
            sources = sources.len(),
            "engine opened"
        );
        Ok(Self::new(settings, user, sources))
    }

    /// Source dictionaries only, with an empty user dictionary.
    pub fn from_sources(settings: &Settings, dicts: &[PathBuf]) -> Result<Self, EngineError> {
        let sources = load_sources(dicts)?;
        Ok(Self::new(settings, MemoryDict::new(USER_DICT_ID), sources))
    }

    pub fn create_session(&self) -> StateMachine {
        StateMachine::with_config(self.dictionary.clone(), self.config)
    }

    pub fn user_dict(&self) -> &Arc<UserDict> {
        &self.dictionary
    }

    pub fn session_config(&self) -> SessionConfig {
        self.config
    }

    /// Leaving private mode discards the words registered during it.
    pub fn set_private_mode(&self, enabled: bool) {
        self.dictionary.set_private_mode(enabled);
    }

    pub fn save_user_dict(&self, path: &Path) -> Result<(), EngineError> {
        self.dictionary
            .save(path)
            .map_err(|source| EngineError::Dict {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn load_sources(dicts: &[PathBuf]) -> Result<Vec<Arc<dyn Dict>>, EngineError> {
    let mut sources: Vec<Arc<dyn Dict>> = Vec::with_capacity(dicts.len());
    for path in dicts {
        sources.push(Arc::new(load_source(path)?));
    }
    Ok(sources)
}

fn load_source(path: &Path) -> Result<TrieDict, EngineError> {
    let id = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (dict, stats) = TrieDict::load(path, id).map_err(|source| EngineError::Dict {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        entries = stats.entries,
        skipped = stats.skipped,
        "loaded source dictionary"
    );
    Ok(dict)
}
