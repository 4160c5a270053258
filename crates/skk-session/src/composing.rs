use tracing::debug;

use skk_core::romaji;
use skk_core::unicode::to_zenkaku;
use skk_core::InputMode;

use super::types::{Action, ComposingState, InputMethodState, KeyEvent};
use super::StateMachine;

impl StateMachine {
    /// Store `next`, falling back to Normal when nothing is left of an
    /// unshifted (romaji-only) composition.
    fn set_composing(&mut self, next: ComposingState) {
        self.state.input_method = if !next.is_shift && next.is_empty() {
            InputMethodState::Normal
        } else {
            InputMethodState::Composing(next)
        };
    }

    /// Cursor keys only move when nothing is pending; otherwise they drop
    /// the pending romaji.
    fn move_composing_cursor(
        &mut self,
        composing: &ComposingState,
        motion: fn(&ComposingState) -> ComposingState,
    ) -> bool {
        if composing.okuri.is_none() {
            let next = if composing.romaji.is_empty() {
                motion(composing)
            } else {
                composing.reset_romaji()
            };
            self.set_composing(next);
            self.update_marked_text();
        }
        true
    }

    pub(crate) fn handle_composing(&mut self, action: &Action, composing: ComposingState) -> bool {
        let mode = self.state.input_mode;
        match &action.event {
            KeyEvent::Enter => {
                let text = composing.string(mode, true);
                self.state.input_method = InputMethodState::Normal;
                self.add_fixed_text(&text);
                true
            }
            KeyEvent::Backspace => {
                match composing.drop_last() {
                    Some(next) => self.set_composing(next),
                    None => self.state.input_method = InputMethodState::Normal,
                }
                self.update_marked_text();
                true
            }
            KeyEvent::Delete => {
                if composing.okuri.is_none() && composing.romaji.is_empty() {
                    self.set_composing(composing.delete_forward());
                    self.update_marked_text();
                }
                true
            }
            KeyEvent::Space => {
                if !composing.is_shift {
                    // Pending romaji only: flush it, then a plain space.
                    let text = composing.string(mode, true);
                    self.state.input_method = InputMethodState::Normal;
                    if !text.is_empty() {
                        self.add_fixed_text(&text);
                    }
                    return self.handle_normal(action);
                }
                let trimmed = composing.trim();
                if trimmed.text.is_empty() {
                    self.state.input_method = InputMethodState::Normal;
                    self.add_fixed_text(" ");
                    return true;
                }
                if trimmed.sub_text().is_empty() {
                    self.set_composing(trimmed);
                    self.update_marked_text();
                    return true;
                }
                self.convert_composition(trimmed, action.cursor_position)
            }
            KeyEvent::StickyShift => {
                if mode == InputMode::Direct {
                    self.set_composing(composing.insert_unit(";".to_string()));
                    self.update_marked_text();
                    return true;
                }
                match &composing.okuri {
                    Some(okuri) if okuri.is_empty() => {}
                    Some(_) => {
                        let semicolon = romaji::Moji::new(";", "；");
                        self.set_composing(composing.append_okuri(&semicolon).reset_romaji());
                        self.update_marked_text();
                    }
                    None if composing.text.is_empty() => {
                        self.state.input_method = InputMethodState::Normal;
                        self.add_fixed_text("；");
                    }
                    None => {
                        self.set_composing(composing.with_shift(true).start_okuri());
                        self.update_marked_text();
                    }
                }
                true
            }
            KeyEvent::Printable(input) => self.handle_composing_printable(input, action, composing),
            KeyEvent::ModeToggleKana => {
                let text = composing.string(mode, true);
                self.state.input_method = InputMethodState::Normal;
                self.add_fixed_text(&text);
                self.change_mode(InputMode::Hiragana, action.cursor_position);
                true
            }
            KeyEvent::Cancel => {
                if !composing.romaji.is_empty() {
                    let next = ComposingState {
                        okuri: None,
                        ..composing.reset_romaji()
                    };
                    self.set_composing(next);
                } else {
                    self.state.input_method = InputMethodState::Normal;
                }
                self.update_marked_text();
                true
            }
            KeyEvent::ModeToggleHalfKana => {
                if composing.okuri.is_some() {
                    return true;
                }
                self.state.input_method = InputMethodState::Normal;
                if mode == InputMode::Direct {
                    self.add_fixed_text(&to_zenkaku(&composing.text.concat()));
                    self.change_mode(InputMode::Hiragana, action.cursor_position);
                } else {
                    self.add_fixed_text(&composing.string(InputMode::HalfKana, false));
                }
                true
            }
            KeyEvent::Left => self.move_composing_cursor(&composing, ComposingState::move_cursor_left),
            KeyEvent::Right => {
                self.move_composing_cursor(&composing, ComposingState::move_cursor_right)
            }
            KeyEvent::LineStart => {
                self.move_composing_cursor(&composing, ComposingState::move_cursor_first)
            }
            KeyEvent::LineEnd => {
                self.move_composing_cursor(&composing, ComposingState::move_cursor_last)
            }
            KeyEvent::Tab => {
                if !composing.is_shift || composing.okuri.is_some() || composing.cursor.is_some() {
                    return true;
                }
                let prefix = composing.text.concat();
                if prefix.is_empty() {
                    return true;
                }
                if let Some(yomi) = self.dictionary.find_completion(&prefix) {
                    debug!(prefix = %prefix, completion = %yomi, "complete");
                    self.set_composing(ComposingState {
                        is_shift: true,
                        text: yomi.chars().map(String::from).collect(),
                        ..Default::default()
                    });
                    self.update_marked_text();
                }
                true
            }
            KeyEvent::Up | KeyEvent::Down | KeyEvent::PasteIntoRegister => true,
        }
    }

    fn handle_composing_printable(
        &mut self,
        input: &str,
        action: &Action,
        composing: ComposingState,
    ) -> bool {
        let mode = self.state.input_mode;
        let lower = input.to_lowercase();

        if mode.is_kana() {
            // Romaji-only buffer: mode keys act as if typed in Normal.
            if (lower == "q" || lower == "l") && !composing.is_shift && composing.text.is_empty() {
                self.state.input_method = InputMethodState::Normal;
                self.update_marked_text();
                return self.handle_normal(action);
            }
            if lower == "q" || lower == "l" {
                if composing.okuri.is_some() {
                    self.set_composing(composing.reset_romaji());
                    self.update_marked_text();
                    return true;
                }
                if lower == "l" {
                    let text = composing.string(mode, true);
                    self.state.input_method = InputMethodState::Normal;
                    self.add_fixed_text(&text);
                    return self.handle_normal(action);
                }
                if action.shift {
                    // Commit as typed and open the next ▽ composition.
                    let text = composing.string(mode, true);
                    self.state.input_method =
                        InputMethodState::Composing(ComposingState::shifted());
                    self.add_fixed_text(&text);
                    self.update_marked_text();
                } else {
                    let opposite = if mode == InputMode::Katakana {
                        InputMode::Hiragana
                    } else {
                        InputMode::Katakana
                    };
                    let text = composing.string(opposite, true);
                    self.state.input_method = InputMethodState::Normal;
                    self.add_fixed_text(&text);
                }
                return true;
            }
            if input == ">" && composing.is_shift && composing.okuri.is_none() {
                let marked = composing.trim().insert_unit(">".to_string());
                if marked.sub_text().len() == 1 {
                    // Leading `>`: the reading is a suffix entry.
                    self.set_composing(marked);
                    self.update_marked_text();
                    return true;
                }
                return self.convert_composition(marked, action.cursor_position);
            }
        }

        match mode {
            InputMode::Hiragana | InputMode::Katakana | InputMode::HalfKana => {
                let converted = romaji::convert(&format!("{}{lower}", composing.romaji));
                let Some(moji) = converted.completed else {
                    let next = if !composing.text.is_empty()
                        && composing.okuri.is_none()
                        && action.shift
                    {
                        composing.start_okuri().with_romaji(converted.remainder)
                    } else {
                        composing.with_romaji(converted.remainder)
                    };
                    self.set_composing(next);
                    self.update_marked_text();
                    return true;
                };

                if converted.remainder.is_empty() {
                    let starts_okuri = !composing.text.is_empty()
                        && (composing.okuri.is_some() || action.shift)
                        && composing.cursor != Some(0);
                    if !starts_okuri {
                        if composing.is_shift || action.shift {
                            self.set_composing(
                                composing.append_text(&moji).reset_romaji().with_shift(true),
                            );
                            self.update_marked_text();
                        } else {
                            self.state.input_method = InputMethodState::Normal;
                            self.add_fixed_text(&moji.string(mode));
                        }
                        return true;
                    }
                    // First complete okurigana unit: convert.
                    let next = composing
                        .append_okuri(&moji)
                        .reset_romaji()
                        .with_shift(true);
                    return self.convert_composition(next, action.cursor_position);
                }

                // A unit completed with input left over (`n` + consonant, sokuon).
                let remainder = converted.remainder;
                let next = if composing.is_shift || action.shift {
                    match &composing.okuri {
                        Some(_) => composing.append_okuri(&moji).with_romaji(""),
                        None if action.shift => composing
                            .append_text(&moji)
                            .reset_romaji()
                            .with_shift(true)
                            .start_okuri(),
                        None => composing.append_text(&moji).reset_romaji().with_shift(true),
                    }
                } else {
                    self.state.input_method = InputMethodState::Normal;
                    self.add_fixed_text(&moji.string(mode));
                    ComposingState::pending(false, "")
                };
                if romaji::is_prefix(&remainder) {
                    self.set_composing(next.with_romaji(remainder));
                    self.update_marked_text();
                    true
                } else {
                    self.set_composing(next);
                    self.update_marked_text();
                    self.handle(&action.retyped(&remainder))
                }
            }
            InputMode::Direct => {
                let characters = action.characters.as_deref().unwrap_or(input);
                self.set_composing(composing.insert_unit(characters.to_string()));
                self.update_marked_text();
                true
            }
            InputMode::FullWidthAlnum => {
                unreachable!("composition is never started in full-width alphanumeric mode")
            }
        }
    }
}
