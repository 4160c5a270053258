use skk_core::{Candidate, InputMode};

use super::composing::render;
use super::{ComposingState, CursorRect, MarkedText, MarkedTextElement};

/// What to go back to when selection is cancelled.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectingPrev {
    pub mode: InputMode,
    pub composing: ComposingState,
}

/// Candidate selection (▼ mode). `candidates` is never empty and
/// `candidate_index` always points into it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectingState {
    pub prev: SelectingPrev,
    /// Dictionary key the candidates were looked up with.
    pub yomi: String,
    candidates: Vec<Candidate>,
    candidate_index: usize,
    pub cursor_position: CursorRect,
}

impl SelectingState {
    /// `None` when there is nothing to select.
    pub fn new(
        prev: SelectingPrev,
        yomi: String,
        candidates: Vec<Candidate>,
        cursor_position: CursorRect,
    ) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }
        Some(Self {
            prev,
            yomi,
            candidates,
            candidate_index: 0,
            cursor_position,
        })
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate_index(&self) -> usize {
        self.candidate_index
    }

    pub fn selected(&self) -> &Candidate {
        &self.candidates[self.candidate_index]
    }

    /// Move the selection by `diff`; `None` when that leaves the list.
    pub fn add_candidate_index(&self, diff: isize) -> Option<Self> {
        self.with_candidate_index(self.candidate_index.checked_add_signed(diff)?)
    }

    pub fn with_candidate_index(&self, index: usize) -> Option<Self> {
        (index < self.candidates.len()).then(|| Self {
            candidate_index: index,
            ..self.clone()
        })
    }

    /// Candidate word, okurigana and any text after the cursor.
    pub fn fixed_text(&self) -> String {
        let mut text = self.selected().word.clone();
        text.push_str(&self.prev.composing.okuri_string(self.prev.mode));
        text.push_str(&self.prev.composing.remain_string(self.prev.mode));
        text
    }

    pub(crate) fn marked_text(&self) -> MarkedText {
        let mut m = MarkedText::default();
        m.push(MarkedTextElement::MarkerSelect);
        let mut head = self.selected().word.clone();
        head.push_str(&self.prev.composing.okuri_string(self.prev.mode));
        m.push(MarkedTextElement::Emphasized(head));
        if let Some(remain) = self.prev.composing.remain() {
            m.push_plain(render(remain, self.prev.mode));
        }
        m
    }
}
