use super::*;

const SOURCE: &str = "\
;; okuri-ari entries.
かk /書/描/
;; okuri-nasi entries.
かんじ /漢字/幹事;organizer/
あき> /秋/
>てき /的/
broken line without slashes
い /胃;stomach/井/
";

fn sample() -> MemoryDict {
    MemoryDict::parse("sample", SOURCE).0
}

#[test]
fn parse_counts_entries_and_skipped_lines() {
    let (dict, stats) = MemoryDict::parse("sample", SOURCE);
    assert_eq!(stats.entries, 5);
    assert_eq!(stats.skipped, 1);
    assert_eq!(dict.len(), 5);
}

#[test]
fn refer_exact_and_affixes() {
    let dict = sample();
    let words: Vec<String> = dict
        .refer("かんじ", None)
        .into_iter()
        .map(|w| w.word)
        .collect();
    assert_eq!(words, vec!["漢字", "幹事"]);
    assert_eq!(dict.refer("あき", Some(ReferOption::Prefix))[0].word, "秋");
    assert_eq!(dict.refer("てき", Some(ReferOption::Suffix))[0].word, "的");
    assert!(dict.refer("あき", None).is_empty());
}

#[test]
fn annotation_carries_dict_id() {
    let dict = sample();
    let words = dict.refer("かんじ", None);
    let a = words[1].annotation.as_ref().unwrap();
    assert_eq!(a.dict_id, "sample");
    assert_eq!(a.text, "organizer");
}

#[test]
fn empty_annotation_is_dropped() {
    let (yomi, words) = parse_line("かんじ /漢字;/感じ;feeling/", "d").unwrap();
    assert_eq!(yomi, "かんじ");
    assert_eq!(words[0], Word::new("漢字"));
    assert_eq!(words[1].annotation.as_ref().unwrap().text, "feeling");
}

#[test]
fn add_promotes_without_duplicating() {
    let mut dict = sample();
    dict.add("かんじ", Word::new("幹事"));
    let words = dict.refer("かんじ", None);
    assert_eq!(words.len(), 2);
    assert_eq!(words[0].word, "幹事");
    // The annotation survives promotion
    assert_eq!(words[0].annotation.as_ref().unwrap().text, "organizer");

    dict.add("かんじ", Word::new("幹事"));
    assert_eq!(dict.refer("かんじ", None).len(), 2);
}

#[test]
fn add_new_reading() {
    let mut dict = MemoryDict::new("user");
    dict.add("ねこ", Word::new("猫"));
    dict.add("ねこ", Word::new("ネコ"));
    let words: Vec<String> = dict.refer("ねこ", None).into_iter().map(|w| w.word).collect();
    assert_eq!(words, vec!["ネコ", "猫"]);
}

#[test]
fn delete_reports_existence() {
    let mut dict = sample();
    assert!(dict.delete("い", "井"));
    assert!(!dict.delete("い", "井"));
    assert!(!dict.delete("ない", "無"));
    assert!(dict.delete("い", "胃"));
    assert!(dict.get("い").is_none());
}

#[test]
fn readings_with_prefix_excludes_self() {
    let dict = MemoryDict::parse("d", "にほ /二歩/\nにほん /日本/\nにほんご /日本語/\n").0;
    let mut readings = dict.readings_with_prefix("にほ");
    readings.sort();
    assert_eq!(readings, vec!["にほん", "にほんご"]);
}

#[test]
fn skk_string_is_sorted_and_reparses() {
    let dict = sample();
    let text = dict.to_skk_string();
    let first = text.lines().next().unwrap();
    assert!(first.starts_with(">てき"));
    let (reparsed, stats) = MemoryDict::parse("sample", &text);
    assert_eq!(stats.skipped, 0);
    assert_eq!(reparsed.refer("い", None), dict.refer("い", None));
}

#[test]
fn save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user-dict.txt");

    let mut dict = MemoryDict::new("user");
    dict.add("えすらっしゅ", Word::new("S/MIME"));
    dict.save(&path).unwrap();
    assert!(!path.with_extension("tmp").exists());

    let loaded = MemoryDict::open(&path, "user").unwrap();
    assert_eq!(loaded.refer("えすらっしゅ", None)[0].word, "S/MIME");
}

#[test]
fn open_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let dict = MemoryDict::open(&dir.path().join("none.txt"), "user").unwrap();
    assert!(dict.is_empty());
}

#[test]
fn load_rejects_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("euc.txt");
    std::fs::write(&path, b"a /b/\n\xa4\xa2 /x/\n").unwrap();
    let err = MemoryDict::load(&path, "d").unwrap_err();
    assert!(matches!(err, DictError::Encoding { line: 2 }));
}

// --- TrieDict ---

#[test]
fn trie_dict_matches_memory_dict() {
    let trie = TrieDict::from(sample());
    assert_eq!(trie.id(), "sample");
    assert_eq!(trie.len(), 5);
    assert_eq!(trie.refer("かんじ", None), sample().refer("かんじ", None));
    assert_eq!(trie.refer("あき", Some(ReferOption::Prefix))[0].word, "秋");
    assert_eq!(trie.refer("てき", Some(ReferOption::Suffix))[0].word, "的");
    assert!(trie.refer("かん", None).is_empty());
}

#[test]
fn trie_dict_predicts_longer_readings() {
    let source = "にほ /二歩/\nにほん /日本/\nにほんご /日本語/\nにわ /庭/\n";
    let trie = TrieDict::from(MemoryDict::parse("d", source).0);
    let mut readings = trie.readings_with_prefix("にほ");
    readings.sort();
    assert_eq!(readings, vec!["にほん", "にほんご"]);
    assert_eq!(trie.readings_with_prefix("にほんご"), Vec::<String>::new());
    assert_eq!(trie.readings_with_prefix("に").len(), 4);
}

#[test]
fn trie_dict_keeps_save_flag() {
    let source = MemoryDict::parse("d", "あ /亜/\n").0.with_save_to_user_dict(false);
    let trie = TrieDict::from(source);
    assert!(!trie.save_to_user_dict());
}

#[test]
fn trie_dict_loads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SKK-JISYO.test");
    std::fs::write(&path, SOURCE).unwrap();
    let (trie, stats) = TrieDict::load(&path, "test").unwrap();
    assert_eq!(stats.skipped, 1);
    assert_eq!(trie.refer("かk", None)[0].word, "書");
}
