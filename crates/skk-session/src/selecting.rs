use tracing::debug;

use skk_core::InputMode;

use super::types::{
    Action, InputMethodState, KeyEvent, SelectingState, SpecialState, UnregisterPrev,
    UnregisterState,
};
use super::StateMachine;

impl StateMachine {
    fn select(&mut self, next: SelectingState) {
        self.update_candidates(Some(&next));
        self.state.input_method = InputMethodState::Selecting(next);
        self.update_marked_text();
    }

    /// Index of the first candidate on the page showing `index`, or `None`
    /// while still inline.
    fn page_start(&self, index: usize) -> Option<usize> {
        let inline = self.config.inline_candidate_count;
        let display = self.config.display_candidate_count;
        (index >= inline).then(|| index - (index - inline) % display)
    }

    pub(crate) fn handle_selecting(&mut self, action: &Action, selecting: SelectingState) -> bool {
        let display = self.config.display_candidate_count;
        let index = selecting.candidate_index();
        match &action.event {
            KeyEvent::Enter => {
                self.commit_selecting(&selecting);
                true
            }
            KeyEvent::Backspace | KeyEvent::Up => {
                let page_start = self
                    .page_start(index)
                    .filter(|_| action.event == KeyEvent::Backspace);
                // Backspace on a page goes to the previous page; from the
                // first page it leaves selection.
                let target = match page_start {
                    Some(start) => start
                        .checked_sub(display)
                        .filter(|&t| t >= self.config.inline_candidate_count),
                    None => index.checked_sub(1),
                };
                match target.and_then(|t| selecting.with_candidate_index(t)) {
                    Some(next) => self.select(next),
                    None => {
                        self.update_candidates(None);
                        self.restore_mode(selecting.prev.mode, action.cursor_position);
                        self.state.input_method =
                            InputMethodState::Composing(selecting.prev.composing);
                        self.update_marked_text();
                    }
                }
                true
            }
            KeyEvent::Space | KeyEvent::Down => {
                let target = match self.page_start(index) {
                    Some(start) if action.event == KeyEvent::Space => start + display,
                    _ => index + 1,
                };
                match selecting.with_candidate_index(target) {
                    Some(next) => self.select(next),
                    None => {
                        debug!(yomi = %selecting.yomi, "candidates exhausted");
                        self.update_candidates(None);
                        if self.state.special_state.is_some() {
                            self.state.input_method = InputMethodState::Normal;
                            self.restore_mode(selecting.prev.mode, action.cursor_position);
                        } else {
                            self.enter_register(
                                selecting.prev.mode,
                                selecting.prev.composing,
                                selecting.yomi,
                                action.cursor_position,
                            );
                        }
                        self.update_marked_text();
                    }
                }
                true
            }
            KeyEvent::StickyShift | KeyEvent::ModeToggleKana | KeyEvent::ModeToggleHalfKana => {
                self.commit_selecting(&selecting);
                self.handle_normal(action)
            }
            KeyEvent::Printable(input) => {
                if input == "x" && action.shift && self.state.special_state.is_none() {
                    let mode = self.state.input_mode;
                    debug!(word = %selecting.selected().word, "confirm unregister");
                    self.state.special_state = Some(SpecialState::Unregister(
                        UnregisterState::new(UnregisterPrev { mode, selecting }),
                    ));
                    self.state.input_method = InputMethodState::Normal;
                    self.update_candidates(None);
                    self.change_mode(InputMode::Direct, action.cursor_position);
                    self.update_marked_text();
                    return true;
                }
                if let (Some(start), Ok(n)) = (self.page_start(index), input.parse::<usize>()) {
                    if (1..=display).contains(&n) {
                        if let Some(chosen) = selecting.with_candidate_index(start + n - 1) {
                            self.commit_selecting(&chosen);
                            return true;
                        }
                    }
                }
                self.commit_selecting(&selecting);
                self.handle_normal(action)
            }
            KeyEvent::Cancel => {
                self.update_candidates(None);
                self.restore_mode(selecting.prev.mode, action.cursor_position);
                self.state.input_method = InputMethodState::Composing(selecting.prev.composing);
                self.update_marked_text();
                true
            }
            KeyEvent::LineStart => {
                if let Some(start) = self.page_start(index).filter(|&s| s < index) {
                    if let Some(next) = selecting.with_candidate_index(start) {
                        self.select(next);
                    }
                }
                true
            }
            KeyEvent::LineEnd => {
                if let Some(start) = self.page_start(index) {
                    let end = (start + display - 1).min(selecting.candidates().len() - 1);
                    if end > index {
                        if let Some(next) = selecting.with_candidate_index(end) {
                            self.select(next);
                        }
                    }
                }
                true
            }
            KeyEvent::Left
            | KeyEvent::Right
            | KeyEvent::Tab
            | KeyEvent::Delete
            | KeyEvent::PasteIntoRegister => true,
        }
    }
}
