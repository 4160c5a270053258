use tracing::debug;

use skk_core::{Candidate, InputMode, ReferOption};

use super::types::{
    Candidates, ComposingState, CursorRect, InputMethodEvent, InputMethodState, Page,
    RegisterPrev, RegisterState, SelectingPrev, SelectingState, SpecialState,
};
use super::StateMachine;

/// Split affix markers off a reading: `あき>` is a prefix entry,
/// `>てき` a suffix entry.
fn lookup_key(yomi: &str) -> (&str, Option<ReferOption>) {
    if yomi.chars().count() > 1 {
        if let Some(rest) = yomi.strip_prefix('>') {
            return (rest, Some(ReferOption::Suffix));
        }
        if let Some(rest) = yomi.strip_suffix('>') {
            return (rest, Some(ReferOption::Prefix));
        }
    }
    (yomi, None)
}

impl StateMachine {
    /// Commit `text`, or append it to the registration buffer when one is
    /// open.
    pub(crate) fn add_fixed_text(&mut self, text: &str) {
        match &self.state.special_state {
            Some(special) => {
                self.state.special_state = Some(special.append_text(text));
                self.update_marked_text();
            }
            None => {
                self.input_method_events
                    .send(InputMethodEvent::FixedText(text.to_string()));
            }
        }
    }

    pub(crate) fn update_marked_text(&mut self) {
        let marked = self.state.display_text();
        self.input_method_events
            .send(InputMethodEvent::MarkedText(marked));
    }

    /// Publish the candidate list for `selecting`, or hide it.
    pub(crate) fn update_candidates(&mut self, selecting: Option<&SelectingState>) {
        let Some(selecting) = selecting else {
            self.candidate_events.send(None);
            return;
        };
        let inline = self.config.inline_candidate_count;
        let display = self.config.display_candidate_count;
        let index = selecting.candidate_index();
        let all = selecting.candidates();

        let page = (index >= inline).then(|| {
            let start = index - (index - inline) % display;
            let end = (start + display).min(all.len());
            Page {
                words: all[start..end].to_vec(),
                current_page: (index - inline) / display,
                total_page_count: (all.len() - inline - 1) / display + 1,
            }
        });
        self.candidate_events.send(Some(Candidates {
            page,
            selected: selecting.selected().clone(),
            cursor_position: selecting.cursor_position,
        }));
    }

    /// Switch mode and tell the host.
    pub(crate) fn change_mode(&mut self, mode: InputMode, cursor_position: CursorRect) {
        self.state.input_mode = mode;
        self.input_method_events
            .send(InputMethodEvent::ModeChanged(mode, cursor_position));
    }

    /// Go back to a saved mode, telling the host only if it differs.
    pub(crate) fn restore_mode(&mut self, mode: InputMode, cursor_position: CursorRect) {
        if self.state.input_mode != mode {
            self.change_mode(mode, cursor_position);
        }
    }

    /// Commit the selected candidate and record it in the dictionary.
    pub(crate) fn commit_selecting(&mut self, selecting: &SelectingState) {
        let candidate = selecting.selected();
        if candidate.save_to_user_dict {
            self.dictionary.add(candidate.midashi(), candidate.to_word());
        }
        debug!(yomi = %selecting.yomi, word = %candidate.word, "commit candidate");
        self.update_candidates(None);
        self.state.input_method = InputMethodState::Normal;
        self.add_fixed_text(&selecting.fixed_text());
    }

    /// Look up `composing` and move to selection, or to registration when
    /// nothing is found.
    pub(crate) fn convert_composition(
        &mut self,
        composing: ComposingState,
        cursor_position: CursorRect,
    ) -> bool {
        let mode = self.state.input_mode;
        let full_yomi = composing.yomi(mode);
        let (yomi, option) = if mode == InputMode::Direct {
            (full_yomi.as_str(), None)
        } else {
            lookup_key(&full_yomi)
        };
        let key = ReferOption::key(option, yomi);
        let candidates = self.dictionary.refer(yomi, option);
        debug!(yomi = %key, count = candidates.len(), "lookup");

        let prev = SelectingPrev {
            mode,
            composing: composing.clone(),
        };
        match SelectingState::new(prev, key.clone(), candidates, cursor_position) {
            Some(selecting) => {
                self.update_candidates(Some(&selecting));
                self.state.input_method = InputMethodState::Selecting(selecting);
            }
            None if self.state.special_state.is_some() => {
                // Registration does not nest.
                self.state.input_method = InputMethodState::Normal;
            }
            None => self.enter_register(mode, composing, key, cursor_position),
        }
        self.update_marked_text();
        true
    }

    pub(crate) fn enter_register(
        &mut self,
        mode: InputMode,
        composing: ComposingState,
        yomi: String,
        cursor_position: CursorRect,
    ) {
        debug!(yomi = %yomi, "enter registration");
        self.state.special_state = Some(SpecialState::Register(RegisterState::new(
            RegisterPrev { mode, composing },
            yomi,
        )));
        self.state.input_method = InputMethodState::Normal;
        self.change_mode(InputMode::Hiragana, cursor_position);
    }

    /// Host-initiated commit (focus lost, app switched).
    ///
    /// Composition is committed as typed, a selection commits its current
    /// candidate, and an open registration is abandoned.
    pub fn commit_composition(&mut self) {
        if let Some(special) = self.state.special_state.take() {
            let mode = match &special {
                SpecialState::Register(r) => r.prev.mode,
                SpecialState::Unregister(u) => u.prev.mode,
            };
            self.state.input_mode = mode;
            self.state.input_method = InputMethodState::Normal;
            self.update_candidates(None);
            self.add_fixed_text("");
            return;
        }
        match self.state.input_method.clone() {
            InputMethodState::Normal => {}
            InputMethodState::Composing(composing) => {
                let text = composing.string(self.state.input_mode, false);
                self.state.input_method = InputMethodState::Normal;
                self.add_fixed_text(&text);
            }
            // A commit forced by the host is not a choice; nothing is learned.
            InputMethodState::Selecting(selecting) => {
                self.update_candidates(None);
                self.state.input_method = InputMethodState::Normal;
                self.add_fixed_text(&selecting.fixed_text());
            }
        }
    }

    /// The host's candidate panel highlighted `candidate`.
    pub fn did_select_candidate(&mut self, candidate: &Candidate) {
        let InputMethodState::Selecting(selecting) = &self.state.input_method else {
            return;
        };
        let Some(next) = selecting
            .candidates()
            .iter()
            .position(|c| c == candidate)
            .and_then(|i| selecting.with_candidate_index(i))
        else {
            return;
        };
        self.update_candidates(Some(&next));
        self.state.input_method = InputMethodState::Selecting(next);
        self.update_marked_text();
    }

    /// The host's candidate panel chose `candidate` (double click).
    pub fn did_double_select_candidate(&mut self, candidate: &Candidate) {
        self.did_select_candidate(candidate);
        if let InputMethodState::Selecting(selecting) = self.state.input_method.clone() {
            if selecting.selected() == candidate {
                self.commit_selecting(&selecting);
            }
        }
    }
}
