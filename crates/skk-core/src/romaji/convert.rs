use serde::Serialize;

use super::table::{LookupResult, RomajiTable};
use crate::unicode::{hiragana_to_katakana, to_hankaku};
use crate::InputMode;

/// One completed kana unit together with the romaji sound that started it.
///
/// `first_romaji` is what okurigana lookups append to the reading, so it is
/// the consonant of the kana's row (`ち` → `t`, `じ` → `z`) rather than
/// whatever the user typed first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Moji {
    pub first_romaji: String,
    pub kana: String,
}

impl Moji {
    pub fn new(first_romaji: impl Into<String>, kana: impl Into<String>) -> Self {
        Self {
            first_romaji: first_romaji.into(),
            kana: kana.into(),
        }
    }

    pub fn katakana(&self) -> String {
        hiragana_to_katakana(&self.kana)
    }

    pub fn hankaku(&self) -> String {
        to_hankaku(&self.kana)
    }

    /// Render for `mode`. Non-kana modes get the hiragana form.
    pub fn string(&self, mode: InputMode) -> String {
        match mode {
            InputMode::Katakana => self.katakana(),
            InputMode::HalfKana => self.hankaku(),
            InputMode::Hiragana | InputMode::Direct | InputMode::FullWidthAlnum => {
                self.kana.clone()
            }
        }
    }
}

/// Result of feeding a romaji fragment through the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    /// The unit completed by this fragment, if any.
    pub completed: Option<Moji>,
    /// Input not consumed yet; it starts the next unit.
    pub remainder: String,
}

impl Converted {
    fn pending(input: &str) -> Self {
        Self {
            completed: None,
            remainder: input.to_string(),
        }
    }
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Convert a romaji fragment into at most one kana unit.
///
/// - exact table match completes a unit
/// - a proper prefix of a key stays pending
/// - `n` followed by anything that cannot continue it becomes ん
/// - a doubled consonant becomes っ and the consonant carries forward
/// - any other dead prefix is discarded
pub fn convert(input: &str) -> Converted {
    convert_with(RomajiTable::global(), input)
}

pub fn convert_with(table: &RomajiTable, input: &str) -> Converted {
    match table.lookup(input) {
        LookupResult::Exact(kana) => {
            return Converted {
                completed: Some(Moji::new(first_romaji(&kana, input), kana)),
                remainder: String::new(),
            };
        }
        LookupResult::Prefix | LookupResult::ExactAndPrefix(_) => {
            return Converted::pending(input);
        }
        LookupResult::None => {}
    }

    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return Converted::pending(input);
    };
    let rest = chars.as_str();

    let Some(second) = rest.chars().next() else {
        // A single character the table does not know about.
        if first.is_ascii_alphabetic() {
            return Converted::pending("");
        }
        return Converted {
            completed: Some(Moji::new(first.to_string(), first.to_string())),
            remainder: String::new(),
        };
    };

    if first == 'n' {
        return Converted {
            completed: Some(Moji::new("n", "ん")),
            remainder: rest.to_string(),
        };
    }
    if first == second && first.is_ascii_lowercase() && !is_vowel(first) {
        return Converted {
            completed: Some(Moji::new(first.to_string(), "っ")),
            remainder: rest.to_string(),
        };
    }
    convert_with(table, rest)
}

/// Resolve a pending fragment when the composition is finalized.
///
/// A lone `n` becomes ん and a fragment that is also a complete key yields
/// that key; everything else is dropped.
pub fn flush(input: &str) -> Option<Moji> {
    if input == "n" {
        return Some(Moji::new("n", "ん"));
    }
    match RomajiTable::global().lookup(input) {
        LookupResult::Exact(kana) | LookupResult::ExactAndPrefix(kana) => {
            Some(Moji::new(first_romaji(&kana, input), kana))
        }
        LookupResult::Prefix | LookupResult::None => None,
    }
}

/// True when `input` could still grow into a table key.
pub fn is_prefix(input: &str) -> bool {
    !input.is_empty() && RomajiTable::global().has_longer_key(input)
}

/// Consonant sound of the row the first kana belongs to.
fn first_romaji(kana: &str, typed: &str) -> String {
    let row = kana.chars().next().and_then(|c| match c {
        'あ' | 'ぁ' => Some("a"),
        'い' | 'ぃ' => Some("i"),
        'う' | 'ぅ' => Some("u"),
        'え' | 'ぇ' => Some("e"),
        'お' | 'ぉ' => Some("o"),
        'か' | 'き' | 'く' | 'け' | 'こ' | 'ゕ' | 'ゖ' => Some("k"),
        'が' | 'ぎ' | 'ぐ' | 'げ' | 'ご' => Some("g"),
        'さ' | 'し' | 'す' | 'せ' | 'そ' => Some("s"),
        'ざ' | 'じ' | 'ず' | 'ぜ' | 'ぞ' => Some("z"),
        'た' | 'ち' | 'つ' | 'て' | 'と' | 'っ' => Some("t"),
        'だ' | 'ぢ' | 'づ' | 'で' | 'ど' => Some("d"),
        'な' | 'に' | 'ぬ' | 'ね' | 'の' | 'ん' => Some("n"),
        'は' | 'ひ' | 'ふ' | 'へ' | 'ほ' => Some("h"),
        'ば' | 'び' | 'ぶ' | 'べ' | 'ぼ' => Some("b"),
        'ぱ' | 'ぴ' | 'ぷ' | 'ぺ' | 'ぽ' => Some("p"),
        'ま' | 'み' | 'む' | 'め' | 'も' => Some("m"),
        'や' | 'ゆ' | 'よ' | 'ゃ' | 'ゅ' | 'ょ' => Some("y"),
        'ら' | 'り' | 'る' | 'れ' | 'ろ' => Some("r"),
        'わ' | 'を' | 'ゎ' => Some("w"),
        'ゔ' => Some("v"),
        _ => None,
    });
    match row {
        Some(r) => r.to_string(),
        None => typed.chars().next().map(String::from).unwrap_or_default(),
    }
}
