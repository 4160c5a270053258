//! SKK dictionary line format: `READING /WORD1;ANNOTATION/WORD2/`.

use super::{Annotation, Word};

/// Counters reported after parsing a dictionary source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub entries: usize,
    pub skipped: usize,
}

/// Parse one non-comment line.
///
/// Returns `None` for lines that do not match
/// `^(\S+) (/(?:[^/\n\r]+/)+)$`.
pub fn parse_line(line: &str, dict_id: &str) -> Option<(String, Vec<Word>)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (yomi, body) = line.split_once(' ')?;
    if yomi.is_empty() || yomi.chars().any(char::is_whitespace) {
        return None;
    }
    let inner = body.strip_prefix('/')?.strip_suffix('/')?;
    if inner.is_empty() {
        return None;
    }

    let mut words = Vec::new();
    for field in inner.split('/') {
        if field.is_empty() {
            return None;
        }
        let word = match field.split_once(';') {
            Some((w, "")) => Word::new(decode_word(w)),
            Some((w, a)) => Word {
                word: decode_word(w),
                annotation: Some(Annotation {
                    dict_id: dict_id.to_string(),
                    text: decode_word(a),
                }),
            },
            None => Word::new(decode_word(field)),
        };
        if word.word.is_empty() {
            return None;
        }
        words.push(word);
    }
    Some((yomi.to_string(), words))
}

/// Decode `(concat "...")` words. `\057` is `/` and `\073` is `;`.
pub fn decode_word(s: &str) -> String {
    match s
        .strip_prefix("(concat \"")
        .and_then(|rest| rest.strip_suffix("\")"))
    {
        Some(body) => body.replace("\\057", "/").replace("\\073", ";"),
        None => s.to_string(),
    }
}

/// Inverse of `decode_word`: wrap words containing `/` or `;`.
pub fn encode_word(s: &str) -> String {
    if s.contains(['/', ';']) {
        format!(
            "(concat \"{}\")",
            s.replace('/', "\\057").replace(';', "\\073")
        )
    } else {
        s.to_string()
    }
}

/// Serialize one reading with its words.
pub(super) fn format_line(yomi: &str, words: &[Word]) -> String {
    let mut line = String::with_capacity(yomi.len() + 2 + words.len() * 8);
    line.push_str(yomi);
    line.push_str(" /");
    for w in words {
        line.push_str(&encode_word(&w.word));
        if let Some(a) = &w.annotation {
            line.push(';');
            line.push_str(&encode_word(&a.text));
        }
        line.push('/');
    }
    line
}
