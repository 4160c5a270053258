use serde::Serialize;

/// Which script printable keys produce.
///
/// Changed only by explicit mode-switch keys; composition and selection keep
/// the mode they started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum InputMode {
    #[default]
    Hiragana,
    Katakana,
    /// Half-width katakana.
    HalfKana,
    /// ASCII pass-through.
    Direct,
    /// Full-width alphanumerics (SKK "eisu").
    FullWidthAlnum,
}

impl InputMode {
    /// Modes in which printable letters go through the romaji table.
    pub fn is_kana(self) -> bool {
        matches!(self, Self::Hiragana | Self::Katakana | Self::HalfKana)
    }
}
