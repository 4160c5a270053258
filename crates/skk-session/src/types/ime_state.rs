use skk_core::InputMode;

use super::{ComposingState, MarkedText, SelectingState, SpecialState};

/// Exactly one of these is active at any time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMethodState {
    #[default]
    Normal,
    Composing(ComposingState),
    Selecting(SelectingState),
}

/// Complete session state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IMEState {
    pub input_mode: InputMode,
    pub input_method: InputMethodState,
    pub special_state: Option<SpecialState>,
}

impl IMEState {
    /// Marked text for the whole state, prompt included.
    pub fn display_text(&self) -> MarkedText {
        let inner = match &self.input_method {
            InputMethodState::Normal => MarkedText::default(),
            InputMethodState::Composing(c) => c.marked_text(self.input_mode),
            InputMethodState::Selecting(s) => s.marked_text(),
        };
        match &self.special_state {
            Some(special) => special.marked_text(inner),
            None => inner,
        }
    }
}
