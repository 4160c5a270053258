mod action;
mod composing;
mod ime_state;
mod marked_text;
mod selecting;
mod special;

pub use action::{Action, CursorRect, KeyEvent};
pub use composing::ComposingState;
pub use ime_state::{IMEState, InputMethodState};
pub use marked_text::{MarkedText, MarkedTextElement};
pub use selecting::{SelectingPrev, SelectingState};
pub use special::{RegisterPrev, RegisterState, SpecialState, UnregisterPrev, UnregisterState};

use skk_core::{Candidate, InputMode};

/// Events on the text/mode output stream.
#[derive(Debug, Clone, PartialEq)]
pub enum InputMethodEvent {
    /// Text to insert. An empty string clears the marked text.
    FixedText(String),
    /// Replace the marked (uncommitted) text.
    MarkedText(MarkedText),
    ModeChanged(InputMode, CursorRect),
}

/// One page of the candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub words: Vec<Candidate>,
    /// Zero-based.
    pub current_page: usize,
    pub total_page_count: usize,
}

/// Payload of the candidate output stream.
///
/// `page` is `None` while the selection is still shown inline in the
/// marked text.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidates {
    pub page: Option<Page>,
    pub selected: Candidate,
    pub cursor_position: CursorRect,
}

/// Paging parameters for candidate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Candidates shown one at a time before the paged list.
    pub inline_candidate_count: usize,
    /// Candidates per page (1..=9).
    pub display_candidate_count: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inline_candidate_count: 3,
            display_candidate_count: 9,
        }
    }
}

impl SessionConfig {
    pub fn from_settings(s: &skk_core::settings::Settings) -> Self {
        Self {
            inline_candidate_count: s.candidates.inline_count,
            display_candidate_count: s.candidates.display_count,
        }
    }
}
