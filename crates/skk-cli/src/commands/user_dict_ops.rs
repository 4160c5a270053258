use std::path::Path;
use std::process;

use skk_engine::skk_core::dict::{MemoryDict, Word};
use skk_engine::skk_core::user_dict::USER_DICT_ID;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn default_user_dict_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{home}/.config/skk/skk-jisyo.utf8")
}

fn open(path: &Path) -> MemoryDict {
    die!(
        MemoryDict::open(path, USER_DICT_ID),
        "Error opening user dictionary: {}"
    )
}

/// Whether `surface` is already registered for `reading`.
fn contains(dict: &MemoryDict, reading: &str, surface: &str) -> bool {
    dict.get(reading)
        .is_some_and(|words| words.iter().any(|w| w.word == surface))
}

/// Registering an existing word moves it to the front, like a commit would.
pub fn user_dict_add(path: &Path, reading: &str, surface: &str) {
    let mut dict = open(path);
    let existed = contains(&dict, reading, surface);
    dict.add(reading, Word::new(surface));
    die!(dict.save(path), "Error saving user dictionary: {}");
    if existed {
        println!("Promoted: {reading} → {surface}");
    } else {
        println!("Added: {reading} → {surface}");
    }
}

pub fn user_dict_remove(path: &Path, reading: &str, surface: &str) {
    let mut dict = open(path);
    if dict.delete(reading, surface) {
        die!(dict.save(path), "Error saving user dictionary: {}");
        println!("Removed: {reading} → {surface}");
    } else {
        println!("Not found: {reading} → {surface}");
    }
}

pub fn user_dict_list(path: &Path) {
    let dict = open(path);
    let entries = dict.entries();
    if entries.is_empty() {
        println!("(empty)");
        return;
    }
    let mut count = 0;
    for (reading, words) in &entries {
        for w in words.iter() {
            println!("{reading}\t{}", w.word);
            count += 1;
        }
    }
    println!("---");
    println!("{count} entries");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.dict");

        user_dict_add(&path, "かんじ", "漢字");
        user_dict_add(&path, "かんじ", "感じ");
        let dict = open(&path);
        let words: Vec<&str> = dict
            .get("かんじ")
            .unwrap()
            .iter()
            .map(|w| w.word.as_str())
            .collect();
        assert_eq!(words, vec!["感じ", "漢字"]);

        user_dict_remove(&path, "かんじ", "感じ");
        let dict = open(&path);
        assert!(contains(&dict, "かんじ", "漢字"));
        assert!(!contains(&dict, "かんじ", "感じ"));
    }

    #[test]
    fn removing_unknown_word_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.dict");
        user_dict_remove(&path, "ない", "無い");
        assert!(!path.exists());
    }
}
