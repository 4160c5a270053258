//! User dictionary layered over read-only source dictionaries.
//!
//! `UserDict` implements the session-facing `Dictionary` trait. Lookups merge
//! the user's own entries first, then each source `Dict` in order; words that
//! appear in several layers are merged into one candidate. Uses `RwLock` for
//! interior mutability so that `add`/`delete` can be called while sessions
//! hold a shared reference.

mod date;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use time::Date;
use tracing::debug;

use crate::candidate::{Candidate, Original};
use crate::dict::{Dict, DictError, Dictionary, MemoryDict, ReferOption, Word};
use crate::numeric::{parse_number_yomi, render_template};
use crate::settings::Settings;

pub const USER_DICT_ID: &str = "user";

#[derive(Debug, Clone, Default)]
pub struct UserDictOptions {
    /// Registrations go to a session-only layer and are never saved.
    pub private_mode: bool,
    /// In private mode, also hide the saved user entries.
    pub ignore_user_dict_in_private_mode: bool,
    /// Completion searches source dictionaries after the user entries.
    pub find_completion_from_all_dicts: bool,
    /// `time` format descriptions for date candidates.
    pub date_formats: Vec<String>,
}

impl UserDictOptions {
    pub fn from_settings(s: &Settings) -> Self {
        Self {
            private_mode: s.dictionary.private_mode,
            ignore_user_dict_in_private_mode: s.dictionary.ignore_user_dict_in_private_mode,
            find_completion_from_all_dicts: s.dictionary.find_completion_from_all_dicts,
            date_formats: s.date_conversions.iter().map(|d| d.format.clone()).collect(),
        }
    }
}

type Clock = Box<dyn Fn() -> Date + Send + Sync>;

pub struct UserDict {
    user: RwLock<MemoryDict>,
    private: RwLock<MemoryDict>,
    dicts: Vec<Arc<dyn Dict>>,
    private_mode: AtomicBool,
    ignore_user_dict_in_private_mode: AtomicBool,
    find_completion_from_all_dicts: bool,
    date_formats: Vec<String>,
    today: Clock,
}

impl UserDict {
    pub fn new(user: MemoryDict, dicts: Vec<Arc<dyn Dict>>, options: UserDictOptions) -> Self {
        Self {
            user: RwLock::new(user),
            private: RwLock::new(MemoryDict::new(USER_DICT_ID)),
            dicts,
            private_mode: AtomicBool::new(options.private_mode),
            ignore_user_dict_in_private_mode: AtomicBool::new(
                options.ignore_user_dict_in_private_mode,
            ),
            find_completion_from_all_dicts: options.find_completion_from_all_dicts,
            date_formats: options.date_formats,
            today: Box::new(date::local_today),
        }
    }

    /// Replace the clock used for date candidates.
    pub fn with_clock(mut self, today: impl Fn() -> Date + Send + Sync + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    pub fn set_private_mode(&self, enabled: bool) {
        self.private_mode.store(enabled, Ordering::Relaxed);
        if !enabled {
            *self.private.write().unwrap_or_else(PoisonError::into_inner) =
                MemoryDict::new(USER_DICT_ID);
        }
    }

    pub fn private_mode(&self) -> bool {
        self.private_mode.load(Ordering::Relaxed)
    }

    pub fn set_ignore_user_dict_in_private_mode(&self, ignore: bool) {
        self.ignore_user_dict_in_private_mode
            .store(ignore, Ordering::Relaxed);
    }

    fn user_entries_visible(&self) -> bool {
        !(self.private_mode() && self.ignore_user_dict_in_private_mode.load(Ordering::Relaxed))
    }

    /// Words stored in the user layer only.
    pub fn refer_user(&self, yomi: &str, option: Option<ReferOption>) -> Vec<Word> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refer(yomi, option)
    }

    /// List all user entries as (reading, word) pairs, sorted by reading.
    pub fn list(&self) -> Vec<(String, String)> {
        let user = self.user.read().unwrap_or_else(PoisonError::into_inner);
        user.entries()
            .into_iter()
            .flat_map(|(yomi, words)| {
                words
                    .iter()
                    .map(move |w| (yomi.to_string(), w.word.clone()))
            })
            .collect()
    }

    /// Save the user layer. Private-mode entries are not written.
    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .save(path)
    }

    /// Candidates from every layer for the literal dictionary key of `yomi`.
    fn refer_merged(&self, yomi: &str, option: Option<ReferOption>) -> Vec<Candidate> {
        let key = ReferOption::key(option, yomi);
        let mut result: Vec<Candidate> = Vec::new();
        let mut merge = |words: Vec<Word>, save: bool| {
            for w in words {
                match result.iter_mut().find(|c| c.word == w.word) {
                    Some(existing) => {
                        existing.append_annotations(w.annotation);
                        existing.save_to_user_dict |= save;
                    }
                    None => {
                        let mut c = Candidate::new(key.as_str(), w.word)
                            .with_annotations(w.annotation.into_iter().collect());
                        c.save_to_user_dict = save;
                        result.push(c);
                    }
                }
            }
        };

        if self.user_entries_visible() {
            merge(self.refer_user(yomi, option), true);
        }
        if self.private_mode() {
            let private = self.private.read().unwrap_or_else(PoisonError::into_inner);
            merge(private.refer(yomi, option), true);
        }
        for dict in &self.dicts {
            merge(dict.refer(yomi, option), dict.save_to_user_dict());
        }
        result
    }

    fn numeric_candidates(&self, yomi: &str) -> Vec<Candidate> {
        let Some(number) = parse_number_yomi(yomi) else {
            return Vec::new();
        };
        self.refer_merged(&number.key, None)
            .into_iter()
            .filter_map(|template| {
                let word = render_template(&template.word, &number.numbers)?;
                Some(Candidate {
                    yomi: yomi.to_string(),
                    word,
                    original: Some(Original {
                        yomi: number.key.clone(),
                        word: template.word,
                    }),
                    annotations: template.annotations,
                    save_to_user_dict: template.save_to_user_dict,
                })
            })
            .collect()
    }
}

impl Dictionary for UserDict {
    fn refer(&self, yomi: &str, option: Option<ReferOption>) -> Vec<Candidate> {
        let mut result = self.refer_merged(yomi, option);
        if option.is_none() {
            let mut extra = self.numeric_candidates(yomi);
            extra.extend(date::date_candidates(
                yomi,
                (self.today)(),
                &self.date_formats,
            ));
            for c in extra {
                if result.iter().all(|r| r.word != c.word) {
                    result.push(c);
                }
            }
        }
        debug!(yomi, ?option, count = result.len(), "refer");
        result
    }

    fn add(&self, yomi: &str, word: Word) {
        debug!(yomi, word = %word.word, private = self.private_mode(), "add");
        let layer = if self.private_mode() {
            &self.private
        } else {
            &self.user
        };
        layer
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(yomi, word);
    }

    fn delete(&self, yomi: &str, word: &str) -> bool {
        let from_user = self
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .delete(yomi, word);
        let from_private = self
            .private
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .delete(yomi, word);
        debug!(yomi, word, removed = from_user || from_private, "delete");
        from_user || from_private
    }

    fn find_completion(&self, prefix: &str) -> Option<String> {
        if prefix.is_empty() {
            return None;
        }
        if self.user_entries_visible() {
            let user = self.user.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = shortest(user.readings_with_prefix(prefix)) {
                return Some(found);
            }
        }
        if self.find_completion_from_all_dicts {
            for dict in &self.dicts {
                if let Some(found) = shortest(dict.readings_with_prefix(prefix)) {
                    return Some(found);
                }
            }
        }
        shortest(
            date::date_yomis()
                .filter(|y| y.len() > prefix.len() && y.starts_with(prefix))
                .map(String::from)
                .collect(),
        )
    }
}

/// Pick the shortest completable reading, ties broken lexicographically.
fn shortest(readings: Vec<String>) -> Option<String> {
    readings
        .into_iter()
        .filter(|r| is_completable(r))
        .min_by(|a, b| {
            a.chars()
                .count()
                .cmp(&b.chars().count())
                .then_with(|| a.cmp(b))
        })
}

/// Affix keys (`あき>`) and okuri-ari keys (`かk`) are not offered.
fn is_completable(reading: &str) -> bool {
    if reading.contains('>') {
        return false;
    }
    let ends_with_okuri = reading.chars().last().is_some_and(|c| c.is_ascii_lowercase());
    !(ends_with_okuri && !reading.is_ascii())
}
