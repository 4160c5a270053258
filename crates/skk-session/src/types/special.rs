use skk_core::InputMode;

use super::{ComposingState, MarkedText, MarkedTextElement, SelectingState};

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterPrev {
    pub mode: InputMode,
    pub composing: ComposingState,
}

/// Word registration: the user types the word for `yomi` from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterState {
    pub prev: RegisterPrev,
    pub yomi: String,
    pub text: String,
    /// Character index into `text`; `None` means the end.
    pub cursor: Option<usize>,
}

impl RegisterState {
    pub fn new(prev: RegisterPrev, yomi: String) -> Self {
        Self {
            prev,
            yomi,
            text: String::new(),
            cursor: None,
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn split(&self) -> (&str, &str) {
        match self.cursor {
            Some(c) => self.text.split_at(self.byte_index(c)),
            None => (self.text.as_str(), ""),
        }
    }

    pub fn append_text(&self, s: &str) -> Self {
        let mut next = self.clone();
        match self.cursor {
            Some(c) => {
                next.text.insert_str(self.byte_index(c), s);
                next.cursor = Some(c + s.chars().count());
            }
            None => next.text.push_str(s),
        }
        next
    }

    pub fn drop_last(&self) -> Self {
        let mut next = self.clone();
        match self.cursor {
            Some(0) => {}
            Some(c) => {
                next.text.remove(self.byte_index(c - 1));
                next.cursor = Some(c - 1);
            }
            None => {
                next.text.pop();
            }
        }
        next
    }

    pub fn delete_forward(&self) -> Self {
        let Some(c) = self.cursor.filter(|&c| c < self.char_len()) else {
            return self.clone();
        };
        let mut next = self.clone();
        next.text.remove(self.byte_index(c));
        if c >= next.char_len() {
            next.cursor = None;
        }
        next
    }

    pub fn move_cursor_left(&self) -> Self {
        if self.text.is_empty() {
            return self.clone();
        }
        let c = self.cursor.unwrap_or(self.char_len());
        Self {
            cursor: Some(c.saturating_sub(1)),
            ..self.clone()
        }
    }

    pub fn move_cursor_right(&self) -> Self {
        let cursor = self.cursor.map(|c| c + 1).filter(|&c| c < self.char_len());
        Self {
            cursor,
            ..self.clone()
        }
    }

    /// Reading as shown in the prompt: `おく*る` for okurigana entries.
    fn label(&self) -> String {
        let composing = &self.prev.composing;
        match composing.okuri.as_ref().filter(|o| !o.is_empty()) {
            Some(okuri) => {
                let mut label = composing.sub_text().concat();
                label.push('*');
                label.extend(okuri.iter().map(|m| m.kana.as_str()));
                label
            }
            None => self.yomi.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnregisterPrev {
    pub mode: InputMode,
    pub selecting: SelectingState,
}

/// Word deletion prompt; confirmed by typing exactly `yes`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnregisterState {
    pub prev: UnregisterPrev,
    pub text: String,
}

impl UnregisterState {
    pub fn new(prev: UnregisterPrev) -> Self {
        Self {
            prev,
            text: String::new(),
        }
    }

    pub fn append_text(&self, s: &str) -> Self {
        Self {
            text: format!("{}{s}", self.text),
            ..self.clone()
        }
    }

    pub fn drop_last(&self) -> Self {
        let mut next = self.clone();
        next.text.pop();
        next
    }

    pub fn confirmed(&self) -> bool {
        self.text == "yes"
    }
}

/// Overlay that captures committed text instead of emitting it.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecialState {
    Register(RegisterState),
    Unregister(UnregisterState),
}

impl SpecialState {
    pub fn append_text(&self, s: &str) -> Self {
        match self {
            Self::Register(r) => Self::Register(r.append_text(s)),
            Self::Unregister(u) => Self::Unregister(u.append_text(s)),
        }
    }

    pub fn drop_last(&self) -> Self {
        match self {
            Self::Register(r) => Self::Register(r.drop_last()),
            Self::Unregister(u) => Self::Unregister(u.drop_last()),
        }
    }

    pub fn delete_forward(&self) -> Self {
        match self {
            Self::Register(r) => Self::Register(r.delete_forward()),
            Self::Unregister(_) => self.clone(),
        }
    }

    pub fn move_cursor_left(&self) -> Self {
        match self {
            Self::Register(r) => Self::Register(r.move_cursor_left()),
            Self::Unregister(_) => self.clone(),
        }
    }

    pub fn move_cursor_right(&self) -> Self {
        match self {
            Self::Register(r) => Self::Register(r.move_cursor_right()),
            Self::Unregister(_) => self.clone(),
        }
    }

    pub fn move_cursor_first(&self) -> Self {
        match self {
            Self::Register(r) if !r.text.is_empty() => Self::Register(RegisterState {
                cursor: Some(0),
                ..r.clone()
            }),
            _ => self.clone(),
        }
    }

    pub fn move_cursor_last(&self) -> Self {
        match self {
            Self::Register(r) => Self::Register(RegisterState {
                cursor: None,
                ..r.clone()
            }),
            Self::Unregister(_) => self.clone(),
        }
    }

    /// Wrap the marked text of the nested input method in the prompt.
    pub(crate) fn marked_text(&self, inner: MarkedText) -> MarkedText {
        let mut m = MarkedText::default();
        match self {
            Self::Register(r) => {
                m.push_plain(format!("[登録：{}]", r.label()));
                let (before, after) = r.split();
                m.push_plain(before);
                let inner_empty = inner.is_empty();
                m.extend(inner);
                if !after.is_empty() {
                    if inner_empty {
                        m.push(MarkedTextElement::Cursor);
                    }
                    m.push_plain(after);
                }
            }
            Self::Unregister(u) => {
                let selected = u.prev.selecting.selected();
                m.push_plain(format!(
                    "{} /{}/ を削除します(yes/no) {}",
                    u.prev.selecting.yomi, selected.word, u.text
                ));
                m.extend(inner);
            }
        }
        m
    }
}
