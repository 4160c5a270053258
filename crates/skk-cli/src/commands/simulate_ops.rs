use std::process;

use serde::Serialize;

use skk_engine::skk_core::romaji::{convert, flush, is_prefix};
use skk_engine::skk_session::{
    Action, Candidates, InputMethodEvent, InputMethodState, KeyEvent, StateMachine,
};

use super::dict_ops::open_engine;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyScriptError {
    #[error("unknown key <{0}>")]
    UnknownKey(String),
    #[error("unterminated <{0}")]
    Unterminated(String),
}

/// Feed `input` through the romaji table one character at a time.
///
/// Returns the kana produced and whatever romaji is left over after
/// flushing.
pub fn transliterate(input: &str) -> (String, String) {
    let mut kana = String::new();
    let mut pending = String::new();
    for c in input.chars() {
        pending.push(c);
        loop {
            let converted = convert(&pending);
            if let Some(moji) = converted.completed {
                kana.push_str(&moji.kana);
            }
            pending = converted.remainder;
            if pending.is_empty() || is_prefix(&pending) {
                break;
            }
        }
    }
    if let Some(moji) = flush(&pending) {
        kana.push_str(&moji.kana);
        pending.clear();
    }
    (kana, pending)
}

pub fn romaji(input: &str) {
    let (kana, pending) = transliterate(input);
    if pending.is_empty() {
        println!("{kana}");
    } else {
        println!("{kana}\t(pending: {pending})");
    }
}

/// Parse a key script. Plain characters are typed as is (uppercase means
/// Shift, a space is the space key); named keys go in angle brackets, e.g.
/// `Kanji <space><enter>`.
pub fn parse_keys(script: &str) -> Result<Vec<(String, Action)>, KeyScriptError> {
    let mut keys = Vec::new();
    let mut chars = script.chars();
    while let Some(c) = chars.next() {
        if c != '<' {
            let action = match c {
                ' ' => Action::new(KeyEvent::Space),
                _ => Action::key(c),
            };
            keys.push((c.to_string(), action));
            continue;
        }
        let rest = chars.as_str();
        let Some(end) = rest.find('>') else {
            return Err(KeyScriptError::Unterminated(rest.to_string()));
        };
        let name = &rest[..end];
        let event = match name {
            "enter" => KeyEvent::Enter,
            "bs" => KeyEvent::Backspace,
            "del" => KeyEvent::Delete,
            "space" => KeyEvent::Space,
            "tab" => KeyEvent::Tab,
            "sticky" => KeyEvent::StickyShift,
            "ctrl-j" => KeyEvent::ModeToggleKana,
            "ctrl-q" => KeyEvent::ModeToggleHalfKana,
            "esc" | "ctrl-g" => KeyEvent::Cancel,
            "left" => KeyEvent::Left,
            "right" => KeyEvent::Right,
            "up" => KeyEvent::Up,
            "down" => KeyEvent::Down,
            "home" => KeyEvent::LineStart,
            "end" => KeyEvent::LineEnd,
            "lt" => KeyEvent::Printable("<".to_string()),
            _ => return Err(KeyScriptError::UnknownKey(name.to_string())),
        };
        keys.push((format!("<{name}>"), Action::new(event)));
        chars = rest[end + 1..].chars();
    }
    Ok(keys)
}

/// What the host would show after one key.
#[derive(Debug, Serialize)]
pub struct Step {
    pub key: String,
    pub handled: bool,
    pub mode: String,
    pub marked: String,
    pub fixed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
}

/// Run `keys` through `sm`, recording each step.
pub fn run_keys(sm: &mut StateMachine, keys: &[(String, Action)]) -> Vec<Step> {
    let events = sm.subscribe_input_method_events();
    let candidate_events = sm.subscribe_candidate_events();
    let mut shown: Option<Candidates> = None;
    let mut steps = Vec::with_capacity(keys.len());

    for (key, action) in keys {
        let handled = sm.handle(action);
        let mut fixed = Vec::new();
        for event in events.try_iter() {
            if let InputMethodEvent::FixedText(text) = event {
                fixed.push(text);
            }
        }
        if let Some(latest) = candidate_events.try_iter().last() {
            shown = latest;
        }
        let state = sm.state();
        let candidates = match (&state.input_method, &shown) {
            (InputMethodState::Selecting(_), Some(c)) => Some(match &c.page {
                Some(page) => page.words.iter().map(|w| w.word.clone()).collect(),
                None => vec![c.selected.word.clone()],
            }),
            _ => None,
        };
        steps.push(Step {
            key: key.clone(),
            handled,
            mode: format!("{:?}", state.input_mode),
            marked: state.display_text().to_string(),
            fixed,
            candidates,
        });
    }
    steps
}

pub fn simulate(dicts: &[String], user: Option<&str>, script: &str, json: bool) {
    let keys = parse_keys(script).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    let engine = open_engine(dicts, user);
    let mut sm = engine.create_session();
    let steps = run_keys(&mut sm, &keys);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&steps).expect("JSON serialization failed")
        );
        return;
    }
    let mut committed = String::new();
    for step in &steps {
        committed.extend(step.fixed.iter().map(String::as_str));
        let mark = if step.handled { ' ' } else { '!' };
        let mut line = format!("{mark} {:<8} {:<14} {}", step.key, step.mode, step.marked);
        if let Some(candidates) = &step.candidates {
            line.push_str(&format!("  [{}]", candidates.join(" ")));
        }
        println!("{}", line.trim_end());
    }
    println!("---");
    println!("committed: {committed}");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use skk_engine::skk_core::dict::{Dict, MemoryDict};
    use skk_engine::skk_core::settings::{default_toml, parse_settings_toml};
    use skk_engine::Engine;

    use super::*;

    #[test]
    fn transliterate_words() {
        assert_eq!(transliterate("kanji"), ("かんじ".to_string(), String::new()));
        assert_eq!(transliterate("kitte"), ("きって".to_string(), String::new()));
        assert_eq!(transliterate("hon"), ("ほん".to_string(), String::new()));
        assert_eq!(transliterate("ky"), (String::new(), "ky".to_string()));
    }

    #[test]
    fn parse_named_keys() {
        let keys = parse_keys("Ka<space><enter><lt>").unwrap();
        let names: Vec<&str> = keys.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["K", "a", "<space>", "<enter>", "<lt>"]);
        assert!(keys[0].1.shift);
        assert_eq!(keys[3].1.event, KeyEvent::Enter);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            parse_keys("a<nope>").unwrap_err(),
            KeyScriptError::UnknownKey("nope".to_string())
        );
        assert_eq!(
            parse_keys("a<enter").unwrap_err(),
            KeyScriptError::Unterminated("enter".to_string())
        );
    }

    #[test]
    fn run_records_each_step() {
        let settings = parse_settings_toml(default_toml()).unwrap();
        let (source, _) = MemoryDict::parse("test", "かんじ /漢字/感じ/\n");
        let engine = Engine::new(
            &settings,
            MemoryDict::new("user"),
            vec![Arc::new(source) as Arc<dyn Dict>],
        );
        let mut sm = engine.create_session();
        let steps = run_keys(&mut sm, &parse_keys("Kanji<space><space><enter>").unwrap());

        assert_eq!(steps[0].marked, "▽k");
        assert_eq!(steps[4].marked, "▽かんじ");
        assert_eq!(steps[5].marked, "▼漢字");
        assert_eq!(steps[5].candidates, Some(vec!["漢字".to_string()]));
        assert_eq!(steps[6].marked, "▼感じ");
        assert_eq!(steps[7].fixed, vec!["感じ"]);
        assert_eq!(steps[7].candidates, None);
        assert!(steps.iter().all(|s| s.handled));
    }
}
