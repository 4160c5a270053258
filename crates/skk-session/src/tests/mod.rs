mod okuri;
mod proptest_fsm;
mod register;

use std::sync::{mpsc, Arc};

use skk_core::dict::{Dict, MemoryDict};
use skk_core::user_dict::{UserDict, UserDictOptions, USER_DICT_ID};

use super::types::{Action, Candidates, InputMethodEvent, KeyEvent};
use super::{SessionConfig, StateMachine};

/// Source dictionary shared by the session tests.
pub(super) fn make_source_dict() -> MemoryDict {
    let many: Vec<String> = (1..=25).map(|i| format!("w{i}")).collect();
    let source = format!(
        "\
;; okuri-ari entries.
おくr /送/贈/
かt /勝/買/
かi /買/飼/
;; okuri-nasi entries.
かんじ /漢字/感じ/幹事/
にほん /日本/二本/
だい# /第#1/第#3/
あき> /秋/
>てき /的/
abc /エービーシー/
かず /{}/
",
        many.join("/")
    );
    MemoryDict::parse("source", &source).0
}

pub(super) fn make_test_dict() -> Arc<UserDict> {
    Arc::new(UserDict::new(
        MemoryDict::new(USER_DICT_ID),
        vec![Arc::new(make_source_dict()) as Arc<dyn Dict>],
        UserDictOptions::default(),
    ))
}

/// A state machine with default paging (3 inline, 9 per page) and both
/// output streams subscribed.
pub(super) struct Harness {
    pub sm: StateMachine,
    pub dict: Arc<UserDict>,
    pub events: mpsc::Receiver<InputMethodEvent>,
    pub candidates: mpsc::Receiver<Option<Candidates>>,
}

impl Harness {
    pub fn new() -> Self {
        let dict = make_test_dict();
        let mut sm = StateMachine::with_config(dict.clone(), SessionConfig::default());
        let events = sm.subscribe_input_method_events();
        let candidates = sm.subscribe_candidate_events();
        Self {
            sm,
            dict,
            events,
            candidates,
        }
    }

    /// Type `s` one key at a time. Uppercase letters are shifted and a
    /// space is the space key.
    pub fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            let action = match c {
                ' ' => Action::new(KeyEvent::Space),
                _ => Action::key(c),
            };
            self.sm.handle(&action);
        }
    }

    pub fn press(&mut self, event: KeyEvent) -> bool {
        self.sm.handle(&Action::new(event))
    }

    /// Drain the text stream, keeping only committed text.
    pub fn fixed(&self) -> Vec<String> {
        self.events
            .try_iter()
            .filter_map(|e| match e {
                InputMethodEvent::FixedText(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Drain the text stream, keeping only the last marked text.
    pub fn last_marked(&self) -> Option<String> {
        self.events
            .try_iter()
            .filter_map(|e| match e {
                InputMethodEvent::MarkedText(m) => Some(m.to_string()),
                _ => None,
            })
            .last()
    }

    pub fn last_candidates(&self) -> Option<Option<Candidates>> {
        self.candidates.try_iter().last()
    }
}
