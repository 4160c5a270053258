use std::path::{Path, PathBuf};
use std::process;

use unicode_width::UnicodeWidthStr;

use skk_engine::skk_core::dict::{Dictionary, MemoryDict, ReferOption};
use skk_engine::skk_core::settings;
use skk_engine::skk_core::Candidate;
use skk_engine::Engine;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Engine over `dicts`, with the user dictionary at `user` if given.
pub fn open_engine(dicts: &[String], user: Option<&str>) -> Engine {
    let paths: Vec<PathBuf> = dicts.iter().map(PathBuf::from).collect();
    let s = settings::settings();
    let engine = match user {
        Some(user) => Engine::open_with_settings(s, Path::new(user), &paths),
        None => Engine::from_sources(s, &paths),
    };
    die!(engine, "Error opening dictionaries: {}")
}

/// `あき>` asks for prefix entries and `>てき` for suffix entries.
fn split_reading(reading: &str) -> (&str, Option<ReferOption>) {
    if let Some(yomi) = reading.strip_suffix('>') {
        (yomi, Some(ReferOption::Prefix))
    } else if let Some(yomi) = reading.strip_prefix('>') {
        (yomi, Some(ReferOption::Suffix))
    } else {
        (reading, None)
    }
}

pub fn lookup(dicts: &[String], user: Option<&str>, reading: &str, json: bool) {
    let engine = open_engine(dicts, user);
    let (yomi, option) = split_reading(reading);
    let candidates = engine.user_dict().refer(yomi, option);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&candidates).expect("JSON serialization failed")
        );
        return;
    }
    if candidates.is_empty() {
        println!("No entries for {reading}");
        return;
    }
    for line in format_candidates(&candidates) {
        println!("{line}");
    }
}

/// One line per candidate: index, word padded to a common display width,
/// then annotations tagged with their dictionary.
fn format_candidates(candidates: &[Candidate]) -> Vec<String> {
    let width = candidates
        .iter()
        .map(|c| c.word.width())
        .max()
        .unwrap_or(0);
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let pad = " ".repeat(width - c.word.width());
            let mut line = format!("{:>3}  {}{pad}", i + 1, c.word);
            for a in &c.annotations {
                line.push_str(&format!("  ;{} [{}]", a.text, a.dict_id));
            }
            if let Some(original) = &c.original {
                line.push_str(&format!("  <- {} /{}/", original.yomi, original.word));
            }
            line.trim_end().to_string()
        })
        .collect()
}

pub fn check(file: &str) {
    let (dict, stats) = die!(
        MemoryDict::load(Path::new(file), file),
        "Error loading {file}: {}"
    );
    println!(
        "{file}: {} readings, {} skipped lines",
        dict.len(),
        stats.skipped
    );
    if stats.skipped > 0 {
        process::exit(1);
    }
}
