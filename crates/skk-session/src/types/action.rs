/// Caret rectangle in host coordinates, passed through to output events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Key classified by the host's keybinding layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Enter,
    Backspace,
    Delete,
    Space,
    Tab,
    /// `;` in kana modes: start a ▽ composition or mark okurigana.
    StickyShift,
    /// A printable key, as typed without modifiers (lowercase letters).
    Printable(String),
    /// Switch to hiragana (Ctrl-J).
    ModeToggleKana,
    /// Toggle half-width katakana (Ctrl-Q).
    ModeToggleHalfKana,
    Cancel,
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    /// Paste `Action::characters` into the registration buffer.
    PasteIntoRegister,
}

/// One input event with its modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub event: KeyEvent,
    pub shift: bool,
    pub option: bool,
    /// Characters the key produced, if any (`"A"` for Shift-a).
    pub characters: Option<String>,
    pub cursor_position: CursorRect,
}

impl Action {
    pub fn new(event: KeyEvent) -> Self {
        let characters = match &event {
            KeyEvent::Printable(s) => Some(s.clone()),
            KeyEvent::Space => Some(" ".to_string()),
            _ => None,
        };
        Self {
            event,
            shift: false,
            option: false,
            characters,
            cursor_position: CursorRect::default(),
        }
    }

    /// A printable key as the host reports it: uppercase ASCII letters
    /// imply Shift and are delivered lowercase.
    pub fn key(c: char) -> Self {
        let mut action = Self::new(KeyEvent::Printable(c.to_ascii_lowercase().to_string()));
        action.shift = c.is_ascii_uppercase();
        action.characters = Some(c.to_string());
        action
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_option(mut self, option: bool) -> Self {
        self.option = option;
        self
    }

    pub fn with_characters(mut self, characters: impl Into<String>) -> Self {
        self.characters = Some(characters.into());
        self
    }

    pub fn with_cursor_position(mut self, cursor_position: CursorRect) -> Self {
        self.cursor_position = cursor_position;
        self
    }

    /// The same key position re-delivered as printable `input`.
    pub(crate) fn retyped(&self, input: &str) -> Self {
        Self {
            event: KeyEvent::Printable(input.to_string()),
            shift: false,
            option: self.option,
            characters: Some(input.to_string()),
            cursor_position: self.cursor_position,
        }
    }
}
