use tracing::{debug, error};

use skk_core::romaji;
use skk_core::unicode::to_zenkaku;
use skk_core::InputMode;

use super::types::{Action, ComposingState, InputMethodState, KeyEvent, SpecialState};
use super::StateMachine;

impl StateMachine {
    pub(crate) fn handle_normal(&mut self, action: &Action) -> bool {
        let mode = self.state.input_mode;
        match &action.event {
            KeyEvent::Enter => match self.state.special_state.clone() {
                Some(SpecialState::Register(register)) => {
                    self.state.special_state = None;
                    if register.text.is_empty() {
                        self.restore_mode(register.prev.mode, action.cursor_position);
                        self.state.input_method =
                            InputMethodState::Composing(register.prev.composing);
                        self.update_marked_text();
                    } else {
                        debug!(yomi = %register.yomi, word = %register.text, "register word");
                        self.dictionary.add(
                            &register.yomi,
                            skk_core::Word::new(register.text.as_str()),
                        );
                        self.restore_mode(register.prev.mode, action.cursor_position);
                        let mut text = register.text.clone();
                        text.push_str(&register.prev.composing.okuri_string(register.prev.mode));
                        text.push_str(&register.prev.composing.remain_string(register.prev.mode));
                        self.add_fixed_text(&text);
                    }
                    true
                }
                Some(SpecialState::Unregister(unregister)) => {
                    self.state.special_state = None;
                    let confirmed = unregister.confirmed();
                    let selecting = unregister.prev.selecting;
                    self.restore_mode(unregister.prev.mode, action.cursor_position);
                    if confirmed {
                        let candidate = selecting.selected();
                        let removed = self
                            .dictionary
                            .delete(candidate.midashi(), candidate.candidate_string());
                        debug!(word = %candidate.word, removed, "unregister word");
                        self.state.input_method = InputMethodState::Normal;
                        self.add_fixed_text("");
                    } else {
                        self.update_candidates(Some(&selecting));
                        self.state.input_method = InputMethodState::Selecting(selecting);
                        self.update_marked_text();
                    }
                    true
                }
                None => false,
            },
            KeyEvent::Backspace => self.edit_special(|s| s.drop_last()),
            KeyEvent::Delete => self.edit_special(|s| s.delete_forward()),
            KeyEvent::Left => self.edit_special(|s| s.move_cursor_left()),
            KeyEvent::Right => self.edit_special(|s| s.move_cursor_right()),
            KeyEvent::LineStart => self.edit_special(|s| s.move_cursor_first()),
            KeyEvent::LineEnd => self.edit_special(|s| s.move_cursor_last()),
            KeyEvent::Up | KeyEvent::Down => self.state.special_state.is_some(),
            KeyEvent::Space => {
                let space = if mode == InputMode::FullWidthAlnum {
                    "\u{3000}"
                } else {
                    " "
                };
                self.add_fixed_text(space);
                true
            }
            KeyEvent::Tab => false,
            KeyEvent::StickyShift => {
                match mode {
                    InputMode::Hiragana | InputMode::Katakana | InputMode::HalfKana => {
                        self.state.input_method =
                            InputMethodState::Composing(ComposingState::shifted());
                        self.update_marked_text();
                    }
                    InputMode::FullWidthAlnum => self.add_fixed_text("；"),
                    InputMode::Direct => self.add_fixed_text(";"),
                }
                true
            }
            KeyEvent::Printable(input) => self.handle_normal_printable(input, action),
            KeyEvent::ModeToggleKana => {
                if matches!(self.state.special_state, Some(SpecialState::Unregister(_))) {
                    return true;
                }
                self.change_mode(InputMode::Hiragana, action.cursor_position);
                true
            }
            KeyEvent::ModeToggleHalfKana => match mode {
                InputMode::Hiragana | InputMode::Katakana => {
                    self.change_mode(InputMode::HalfKana, action.cursor_position);
                    true
                }
                InputMode::HalfKana => {
                    self.change_mode(InputMode::Hiragana, action.cursor_position);
                    true
                }
                InputMode::Direct | InputMode::FullWidthAlnum => false,
            },
            KeyEvent::Cancel => match self.state.special_state.take() {
                Some(SpecialState::Register(register)) => {
                    self.restore_mode(register.prev.mode, action.cursor_position);
                    self.state.input_method =
                        InputMethodState::Composing(register.prev.composing);
                    self.update_marked_text();
                    true
                }
                Some(SpecialState::Unregister(unregister)) => {
                    self.restore_mode(unregister.prev.mode, action.cursor_position);
                    self.update_candidates(Some(&unregister.prev.selecting));
                    self.state.input_method =
                        InputMethodState::Selecting(unregister.prev.selecting);
                    self.update_marked_text();
                    true
                }
                None => false,
            },
            KeyEvent::PasteIntoRegister => {
                if !matches!(self.state.special_state, Some(SpecialState::Register(_))) {
                    return false;
                }
                if let Some(text) = &action.characters {
                    self.add_fixed_text(text);
                }
                true
            }
        }
    }

    /// Apply `edit` to the open registration/unregistration buffer.
    fn edit_special(&mut self, edit: impl FnOnce(&SpecialState) -> SpecialState) -> bool {
        let Some(special) = &self.state.special_state else {
            return false;
        };
        self.state.special_state = Some(edit(special));
        self.update_marked_text();
        true
    }

    fn handle_normal_printable(&mut self, input: &str, action: &Action) -> bool {
        let mode = self.state.input_mode;
        let lower = input.to_lowercase();

        if mode.is_kana() {
            match lower.as_str() {
                "q" => {
                    let next = if mode == InputMode::Hiragana {
                        InputMode::Katakana
                    } else {
                        InputMode::Hiragana
                    };
                    self.change_mode(next, action.cursor_position);
                    return true;
                }
                "l" => {
                    let next = if action.shift {
                        InputMode::FullWidthAlnum
                    } else {
                        InputMode::Direct
                    };
                    self.change_mode(next, action.cursor_position);
                    return true;
                }
                "/" if !action.shift => {
                    self.change_mode(InputMode::Direct, action.cursor_position);
                    self.state.input_method =
                        InputMethodState::Composing(ComposingState::shifted());
                    self.update_marked_text();
                    return true;
                }
                _ => {}
            }
        }

        match mode {
            InputMode::Hiragana | InputMode::Katakana | InputMode::HalfKana => {
                let is_alphabet = !lower.is_empty() && lower.chars().all(|c| c.is_ascii_alphabetic());
                if is_alphabet && !action.option {
                    let converted = romaji::convert(&lower);
                    if let Some(moji) = converted.completed {
                        if action.shift {
                            let composing = ComposingState::shifted()
                                .append_text(&moji)
                                .with_romaji(converted.remainder);
                            self.state.input_method = InputMethodState::Composing(composing);
                            self.update_marked_text();
                        } else {
                            self.add_fixed_text(&moji.string(mode));
                        }
                    } else if converted.remainder.is_empty() {
                        // A letter the table cannot start anything with.
                        self.add_fixed_text(action.characters.as_deref().unwrap_or(input));
                    } else {
                        self.state.input_method = InputMethodState::Composing(
                            ComposingState::pending(action.shift, converted.remainder),
                        );
                        self.update_marked_text();
                    }
                } else {
                    let characters = action.characters.as_deref().unwrap_or(input);
                    match romaji::convert(characters).completed {
                        Some(moji) => self.add_fixed_text(&moji.string(mode)),
                        None => self.add_fixed_text(characters),
                    }
                }
                true
            }
            InputMode::FullWidthAlnum => match &action.characters {
                Some(characters) => {
                    self.add_fixed_text(&to_zenkaku(characters));
                    true
                }
                None => {
                    error!("printable key without characters in full-width mode");
                    false
                }
            },
            InputMode::Direct => match &action.characters {
                Some(characters) => {
                    self.add_fixed_text(characters);
                    true
                }
                None => false,
            },
        }
    }
}
