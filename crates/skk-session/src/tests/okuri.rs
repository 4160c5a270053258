use super::*;
use crate::types::{InputMethodState, SpecialState};
use skk_core::dict::Dictionary;

#[test]
fn test_okuri_lookup_uses_first_consonant() {
    let mut h = Harness::new();
    h.type_str("OkuR");
    assert_eq!(h.last_marked().as_deref(), Some("▽おく*r"));
    h.type_str("u");
    let InputMethodState::Selecting(selecting) = &h.sm.state().input_method else {
        panic!("expected selecting, got {:?}", h.sm.state().input_method);
    };
    assert_eq!(selecting.yomi, "おくr");
    assert_eq!(h.last_marked().as_deref(), Some("▼送る"));

    h.press(KeyEvent::Enter);
    assert_eq!(h.fixed(), vec!["送る"]);
    assert_eq!(h.dict.refer_user("おくr", None)[0].word, "送");
}

#[test]
fn test_okuri_sokuon() {
    let mut h = Harness::new();
    h.type_str("KaTta");
    let InputMethodState::Selecting(selecting) = &h.sm.state().input_method else {
        panic!("expected selecting");
    };
    assert_eq!(selecting.yomi, "かt");
    h.press(KeyEvent::Enter);
    assert_eq!(h.fixed(), vec!["勝った"]);
}

#[test]
fn test_okuri_vowel() {
    // Shift on a vowel completes the okurigana unit at once.
    let mut h = Harness::new();
    h.type_str("KaI");
    let InputMethodState::Selecting(selecting) = &h.sm.state().input_method else {
        panic!("expected selecting");
    };
    assert_eq!(selecting.yomi, "かi");
    assert!(h.sm.state().special_state.is_none());
}

#[test]
fn test_sticky_shift_marks_okuri() {
    let mut h = Harness::new();
    h.type_str("Oku");
    h.press(KeyEvent::StickyShift);
    assert_eq!(h.last_marked().as_deref(), Some("▽おく*"));
    h.type_str("ru");
    assert_eq!(h.last_marked().as_deref(), Some("▼送る"));
}

#[test]
fn test_okuri_without_candidates_registers() {
    let mut h = Harness::new();
    h.type_str("HoGe");
    let Some(SpecialState::Register(register)) = &h.sm.state().special_state else {
        panic!("expected registration");
    };
    assert_eq!(register.yomi, "ほg");
    assert_eq!(h.last_marked().as_deref(), Some("[登録：ほ*げ]"));
}

#[test]
fn test_cancel_from_okuri_selection_restores_okuri() {
    let mut h = Harness::new();
    h.type_str("OkuRu");
    h.press(KeyEvent::Cancel);
    assert_eq!(h.last_marked().as_deref(), Some("▽おく*る"));
    // Cursor keys are ignored while okurigana is set.
    h.press(KeyEvent::Left);
    assert_eq!(h.last_marked(), None);
    h.press(KeyEvent::Backspace);
    assert_eq!(h.last_marked().as_deref(), Some("▽おく*"));
}

#[test]
fn test_numeric_conversion() {
    let mut h = Harness::new();
    h.type_str("Dai5 ");
    let InputMethodState::Selecting(selecting) = &h.sm.state().input_method else {
        panic!("expected selecting");
    };
    let words: Vec<&str> = selecting.candidates().iter().map(|c| c.word.as_str()).collect();
    assert_eq!(words, vec!["第5", "第五"]);
    let original = selecting.selected().original.clone().unwrap();
    assert_eq!(original.word, "第#1");
    h.press(KeyEvent::Enter);
    assert_eq!(h.fixed(), vec!["第5"]);
    // The template is what gets learned.
    assert_eq!(h.dict.refer_user("だい#", None)[0].word, "第#1");
}

#[test]
fn test_prefix_lookup() {
    let mut h = Harness::new();
    h.type_str("Aki>");
    assert_eq!(h.last_marked().as_deref(), Some("▼秋"));
    h.press(KeyEvent::Enter);
    assert_eq!(h.fixed(), vec!["秋"]);
}

#[test]
fn test_suffix_lookup() {
    let mut h = Harness::new();
    h.press(KeyEvent::StickyShift);
    h.type_str(">teki");
    assert_eq!(h.last_marked().as_deref(), Some("▽>てき"));
    h.type_str(" ");
    assert_eq!(h.last_marked().as_deref(), Some("▼的"));
    h.press(KeyEvent::Enter);
    assert_eq!(h.fixed(), vec!["的"]);
    assert_eq!(h.dict.refer(">てき", None).len(), 1);
}
