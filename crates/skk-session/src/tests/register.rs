use super::*;
use crate::types::{InputMethodState, SpecialState};
use skk_core::InputMode;

fn register_text(h: &Harness) -> String {
    match &h.sm.state().special_state {
        Some(SpecialState::Register(r)) => r.text.clone(),
        other => panic!("expected registration, got {other:?}"),
    }
}

// --- Registration ---

#[test]
fn test_empty_lookup_enters_registration() {
    let mut h = Harness::new();
    h.type_str("Hoge ");
    let Some(SpecialState::Register(register)) = &h.sm.state().special_state else {
        panic!("expected registration");
    };
    assert_eq!(register.yomi, "ほげ");
    assert_eq!(h.sm.state().input_method, InputMethodState::Normal);
    assert_eq!(h.last_marked().as_deref(), Some("[登録：ほげ]"));
}

#[test]
fn test_register_word_from_nested_conversion() {
    let mut h = Harness::new();
    h.type_str("Hoge ");
    h.type_str("Kanji ");
    assert_eq!(h.last_marked().as_deref(), Some("[登録：ほげ]▼漢字"));
    h.press(KeyEvent::Enter);
    assert_eq!(register_text(&h), "漢字");
    assert_eq!(h.last_marked().as_deref(), Some("[登録：ほげ]漢字"));
    // Nested commits go to the buffer, not to the host.
    assert!(h.fixed().is_empty());

    h.press(KeyEvent::Enter);
    assert_eq!(h.fixed(), vec!["漢字"]);
    assert!(h.sm.state().special_state.is_none());
    assert_eq!(h.dict.refer_user("ほげ", None)[0].word, "漢字");
}

#[test]
fn test_register_with_okuri_commits_okuri() {
    let mut h = Harness::new();
    h.type_str("HoGe");
    h.type_str("ho");
    assert_eq!(register_text(&h), "ほ");
    h.press(KeyEvent::Enter);
    assert_eq!(h.fixed(), vec!["ほげ"]);
    assert_eq!(h.dict.refer_user("ほg", None)[0].word, "ほ");
}

#[test]
fn test_register_empty_enter_restores_composition() {
    let mut h = Harness::new();
    h.type_str("Hoge ");
    h.press(KeyEvent::Enter);
    assert!(h.sm.state().special_state.is_none());
    assert_eq!(h.last_marked().as_deref(), Some("▽ほげ"));
}

#[test]
fn test_register_cancel_restores_composition() {
    let mut h = Harness::new();
    h.type_str("q");
    h.type_str("Hoge ");
    assert_eq!(h.sm.input_mode(), InputMode::Hiragana);
    h.type_str("a");
    h.press(KeyEvent::Cancel);
    assert!(h.sm.state().special_state.is_none());
    assert_eq!(h.sm.input_mode(), InputMode::Katakana);
    assert_eq!(h.last_marked().as_deref(), Some("▽ホゲ"));
}

#[test]
fn test_register_buffer_editing() {
    let mut h = Harness::new();
    h.type_str("Hoge ");
    h.type_str("aiu");
    h.press(KeyEvent::Left);
    h.press(KeyEvent::Backspace);
    assert_eq!(register_text(&h), "あう");
    assert_eq!(h.last_marked().as_deref(), Some("[登録：ほげ]あう"));
    assert_eq!(
        h.sm.state().display_text().cursor_offset(),
        Some("[登録：ほげ]あ".chars().count())
    );
    h.press(KeyEvent::Delete);
    assert_eq!(register_text(&h), "あ");
    h.press(KeyEvent::Enter);
    assert_eq!(h.fixed(), vec!["あ"]);
}

#[test]
fn test_nested_empty_lookup_does_not_nest() {
    let mut h = Harness::new();
    h.type_str("Hoge ");
    h.type_str("Fuga ");
    assert_eq!(h.sm.state().input_method, InputMethodState::Normal);
    let Some(SpecialState::Register(register)) = &h.sm.state().special_state else {
        panic!("expected registration");
    };
    assert_eq!(register.yomi, "ほげ");
    assert_eq!(register.text, "");
}

#[test]
fn test_paste_into_register() {
    let mut h = Harness::new();
    assert!(!h.sm.handle(&Action::new(KeyEvent::PasteIntoRegister).with_characters("x")));
    h.type_str("Hoge ");
    let paste = Action::new(KeyEvent::PasteIntoRegister).with_characters("保下");
    assert!(h.sm.handle(&paste));
    assert_eq!(register_text(&h), "保下");
}

#[test]
fn test_commit_composition_abandons_registration() {
    let mut h = Harness::new();
    h.type_str("Hoge ");
    h.type_str("a");
    h.sm.commit_composition();
    assert_eq!(h.fixed(), vec![""]);
    assert!(h.sm.state().special_state.is_none());
    assert!(h.dict.refer_user("ほげ", None).is_empty());
}

// --- Unregistration ---

fn learn_kanji(h: &mut Harness) {
    h.type_str("Kanji ");
    h.press(KeyEvent::Enter);
    assert_eq!(h.dict.refer_user("かんじ", None).len(), 1);
    h.events.try_iter().count();
}

#[test]
fn test_unregister_confirmed() {
    let mut h = Harness::new();
    learn_kanji(&mut h);
    h.type_str("Kanji X");
    assert_eq!(h.sm.input_mode(), InputMode::Direct);
    assert_eq!(
        h.last_marked().as_deref(),
        Some("かんじ /漢字/ を削除します(yes/no) ")
    );
    // Mode keys are ignored while the prompt is open.
    assert!(h.press(KeyEvent::ModeToggleKana));
    assert_eq!(h.sm.input_mode(), InputMode::Direct);

    h.type_str("yes");
    h.press(KeyEvent::Enter);
    assert!(h.dict.refer_user("かんじ", None).is_empty());
    assert_eq!(h.sm.input_mode(), InputMode::Hiragana);
    assert_eq!(h.sm.state().input_method, InputMethodState::Normal);
    assert!(h.sm.state().special_state.is_none());
}

#[test]
fn test_unregister_declined_restores_selection() {
    let mut h = Harness::new();
    learn_kanji(&mut h);
    h.type_str("Kanji ");
    let before = h.sm.state().input_method.clone();
    h.type_str("Xno");
    h.press(KeyEvent::Enter);
    assert_eq!(h.sm.state().input_method, before);
    assert_eq!(h.sm.input_mode(), InputMode::Hiragana);
    assert_eq!(h.dict.refer_user("かんじ", None).len(), 1);
}

#[test]
fn test_unregister_cancel_restores_selection() {
    let mut h = Harness::new();
    h.type_str("Kanji ");
    let before = h.sm.state().input_method.clone();
    h.type_str("X");
    h.press(KeyEvent::Cancel);
    assert_eq!(h.sm.state().input_method, before);
    assert!(h.sm.state().special_state.is_none());
    assert!(h.last_candidates().unwrap().is_some());
}
