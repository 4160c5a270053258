use skk_core::romaji::{self, Moji};
use skk_core::unicode::{hiragana_to_katakana, to_hankaku};
use skk_core::InputMode;

use super::{MarkedText, MarkedTextElement};

/// Composition buffer (▽ mode, or pending romaji before the first kana).
///
/// Every operation returns a new value; the previous one stays valid as the
/// snapshot selection and registration return to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposingState {
    /// Shown with ▽; false while only romaji is pending in Normal.
    pub is_shift: bool,
    /// Completed kana units (hiragana, or literal text in abbrev mode).
    pub text: Vec<String>,
    /// `None`: not capturing okurigana. `Some([])`: capturing, nothing yet.
    pub okuri: Option<Vec<Moji>>,
    /// Romaji not yet converted.
    pub romaji: String,
    /// Unit index into `text`; `None` means the end.
    pub cursor: Option<usize>,
}

impl ComposingState {
    /// Empty ▽ composition.
    pub fn shifted() -> Self {
        Self {
            is_shift: true,
            ..Default::default()
        }
    }

    /// Romaji pending with nothing converted yet.
    pub fn pending(is_shift: bool, romaji: impl Into<String>) -> Self {
        Self {
            is_shift,
            romaji: romaji.into(),
            ..Default::default()
        }
    }

    fn cursor_index(&self) -> usize {
        self.cursor.map_or(self.text.len(), |c| c.min(self.text.len()))
    }

    /// Units before the cursor. This is what gets converted.
    pub fn sub_text(&self) -> &[String] {
        &self.text[..self.cursor_index()]
    }

    /// Units after the cursor, if any.
    pub fn remain(&self) -> Option<&[String]> {
        let c = self.cursor_index();
        (c < self.text.len()).then(|| &self.text[c..])
    }

    /// True when there is nothing to show or commit.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.okuri.is_none() && self.romaji.is_empty()
    }

    pub fn with_shift(&self, is_shift: bool) -> Self {
        Self {
            is_shift,
            ..self.clone()
        }
    }

    pub fn with_romaji(&self, romaji: impl Into<String>) -> Self {
        Self {
            romaji: romaji.into(),
            ..self.clone()
        }
    }

    pub fn reset_romaji(&self) -> Self {
        self.with_romaji("")
    }

    /// Start capturing okurigana.
    pub fn start_okuri(&self) -> Self {
        Self {
            okuri: Some(self.okuri.clone().unwrap_or_default()),
            ..self.clone()
        }
    }

    /// Insert `moji` at the cursor.
    pub fn append_text(&self, moji: &Moji) -> Self {
        self.insert_unit(moji.kana.clone())
    }

    /// Insert a literal unit at the cursor (abbrev mode).
    pub fn insert_unit(&self, unit: String) -> Self {
        let mut next = self.clone();
        let c = self.cursor_index();
        next.text.insert(c, unit);
        next.cursor = self.cursor.map(|_| c + 1);
        next
    }

    pub fn append_okuri(&self, moji: &Moji) -> Self {
        let mut okuri = self.okuri.clone().unwrap_or_default();
        okuri.push(moji.clone());
        Self {
            okuri: Some(okuri),
            ..self.clone()
        }
    }

    /// Remove one step of input: a romaji letter, an okurigana unit, the
    /// okurigana marker, or the unit before the cursor. `None` when the
    /// composition becomes empty.
    pub fn drop_last(&self) -> Option<Self> {
        let mut next = self.clone();
        if !next.romaji.is_empty() {
            next.romaji.pop();
        } else if let Some(okuri) = &mut next.okuri {
            if okuri.pop().is_none() {
                next.okuri = None;
            }
        } else {
            let c = self.cursor_index();
            if c == 0 {
                return (!self.text.is_empty()).then_some(next);
            }
            next.text.remove(c - 1);
            next.cursor = self.cursor.map(|_| c - 1);
        }
        (!next.is_empty()).then_some(next)
    }

    /// Remove the unit at the cursor.
    pub fn delete_forward(&self) -> Self {
        let Some(c) = self.cursor.filter(|&c| c < self.text.len()) else {
            return self.clone();
        };
        let mut next = self.clone();
        next.text.remove(c);
        if c >= next.text.len() {
            next.cursor = None;
        }
        next
    }

    pub fn move_cursor_left(&self) -> Self {
        if self.text.is_empty() {
            return self.clone();
        }
        Self {
            cursor: Some(self.cursor_index().saturating_sub(1)),
            ..self.clone()
        }
    }

    pub fn move_cursor_right(&self) -> Self {
        let cursor = self
            .cursor
            .map(|c| c + 1)
            .filter(|&c| c < self.text.len());
        Self {
            cursor,
            ..self.clone()
        }
    }

    pub fn move_cursor_first(&self) -> Self {
        if self.text.is_empty() {
            return self.clone();
        }
        Self {
            cursor: Some(0),
            ..self.clone()
        }
    }

    pub fn move_cursor_last(&self) -> Self {
        Self {
            cursor: None,
            ..self.clone()
        }
    }

    /// Resolve pending romaji before a lookup: `n` becomes ん, anything
    /// else incomplete is dropped.
    pub fn trim(&self) -> Self {
        if self.romaji.is_empty() {
            return self.clone();
        }
        match romaji::flush(&self.romaji) {
            Some(moji) if self.okuri.is_some() => self.append_okuri(&moji).reset_romaji(),
            Some(moji) => self.append_text(&moji).reset_romaji(),
            None => self.reset_romaji(),
        }
    }

    /// Dictionary reading: units before the cursor plus, with okurigana,
    /// the first romaji sound of the first okurigana unit.
    pub fn yomi(&self, mode: InputMode) -> String {
        let mut yomi = self.sub_text().concat();
        if mode != InputMode::Direct {
            if let Some(first) = self.okuri.as_ref().and_then(|o| o.first()) {
                yomi.push_str(&first.first_romaji);
            }
        }
        yomi
    }

    /// Text to commit as-is (no conversion).
    pub fn string(&self, mode: InputMode, convert_hatsuon: bool) -> String {
        let base = if convert_hatsuon && self.romaji == "n" {
            self.trim()
        } else {
            self.clone()
        };
        let mut out = render(&base.text, mode);
        out.push_str(&base.okuri_string(mode));
        out
    }

    pub fn okuri_string(&self, mode: InputMode) -> String {
        self.okuri
            .as_ref()
            .map(|o| o.iter().map(|m| m.string(mode)).collect())
            .unwrap_or_default()
    }

    pub fn remain_string(&self, mode: InputMode) -> String {
        self.remain().map(|r| render(r, mode)).unwrap_or_default()
    }

    pub(crate) fn marked_text(&self, mode: InputMode) -> MarkedText {
        let mut m = MarkedText::default();
        if self.is_shift {
            m.push(MarkedTextElement::MarkerCompose);
        }
        let mut head = render(self.sub_text(), mode);
        if let Some(okuri) = &self.okuri {
            head.push('*');
            head.extend(okuri.iter().map(|o| o.string(mode)));
        }
        head.push_str(&self.romaji);
        m.push_plain(head);
        if let Some(remain) = self.remain() {
            m.push(MarkedTextElement::Cursor);
            m.push_plain(render(remain, mode));
        }
        m
    }
}

/// Join kana units in the script of `mode`.
pub(crate) fn render(units: &[String], mode: InputMode) -> String {
    let joined = units.concat();
    match mode {
        InputMode::Katakana => hiragana_to_katakana(&joined),
        InputMode::HalfKana => to_hankaku(&joined),
        InputMode::Hiragana | InputMode::Direct | InputMode::FullWidthAlnum => joined,
    }
}
