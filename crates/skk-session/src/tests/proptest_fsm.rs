//! Property-based tests for the SKK state machine.
//!
//! Generates random key sequences via proptest and verifies that structural
//! invariants hold after every action.

use proptest::prelude::*;

use skk_core::InputMode;

use super::Harness;
use crate::types::{Action, InputMethodState, KeyEvent, SpecialState};

// ---------------------------------------------------------------------------
// Strategy: weighted random key generation
// ---------------------------------------------------------------------------

fn arb_letter() -> impl Strategy<Value = char> {
    // Vowels at higher weight for more realistic romaji
    prop_oneof![
        3 => prop::sample::select(vec!['a', 'i', 'u', 'e', 'o']),
        2 => prop::sample::select(vec![
            'k', 's', 't', 'n', 'h', 'm', 'y', 'r', 'w', 'g', 'z', 'd', 'b', 'p', 'j', 'f',
        ]),
        1 => prop::sample::select(vec!['K', 'S', 'T', 'N', 'O', 'A', 'R', 'G']),
        1 => prop::sample::select(vec!['q', 'l', 'L', 'x', 'X', 'Q']),
    ]
}

fn arb_key() -> impl Strategy<Value = Action> {
    prop_oneof![
        40 => arb_letter().prop_map(Action::key),
        3 => prop::sample::select(vec!['1', '2', '5', '-', ',', '.', '>', '/'])
            .prop_map(Action::key),
        8 => Just(Action::new(KeyEvent::Space)),
        6 => Just(Action::new(KeyEvent::Enter)),
        6 => Just(Action::new(KeyEvent::Backspace)),
        4 => Just(Action::new(KeyEvent::Cancel)),
        3 => Just(Action::new(KeyEvent::StickyShift)),
        2 => Just(Action::new(KeyEvent::Tab)),
        2 => Just(Action::new(KeyEvent::Delete)),
        2 => Just(Action::new(KeyEvent::Up)),
        2 => Just(Action::new(KeyEvent::Down)),
        2 => Just(Action::new(KeyEvent::Left)),
        2 => Just(Action::new(KeyEvent::Right)),
        1 => Just(Action::new(KeyEvent::LineStart)),
        1 => Just(Action::new(KeyEvent::LineEnd)),
        1 => Just(Action::new(KeyEvent::ModeToggleKana)),
        1 => Just(Action::new(KeyEvent::ModeToggleHalfKana)),
        1 => Just(Action::new(KeyEvent::PasteIntoRegister).with_characters("貼")),
    ]
}

// ---------------------------------------------------------------------------
// Invariant checks — run after every action
// ---------------------------------------------------------------------------

fn assert_invariants(h: &Harness, action: &Action, was_converting: bool) {
    let state = h.sm.state();

    // 1. Selection always points into a non-empty list
    if let InputMethodState::Selecting(s) = &state.input_method {
        assert!(!s.candidates().is_empty(), "empty selection after {action:?}");
        assert!(
            s.candidate_index() < s.candidates().len(),
            "index {} out of bounds after {action:?}",
            s.candidate_index()
        );
    }

    // 2. An unshifted composition always has something pending
    if let InputMethodState::Composing(c) = &state.input_method {
        assert!(
            c.is_shift || !c.is_empty(),
            "empty unshifted composition after {action:?}"
        );
        assert_ne!(
            state.input_mode,
            InputMode::FullWidthAlnum,
            "composition in full-width mode after {action:?}"
        );
        if let Some(cursor) = c.cursor {
            assert!(cursor <= c.text.len(), "cursor past text after {action:?}");
        }
    }

    // 3. The unregister prompt is answered in direct mode from Normal
    if let Some(SpecialState::Unregister(_)) = &state.special_state {
        assert_eq!(state.input_method, InputMethodState::Normal);
        assert_eq!(state.input_mode, InputMode::Direct);
    }

    // 4. Enter while converting without an overlay always lands in Normal
    if was_converting && action.event == KeyEvent::Enter {
        assert_eq!(
            state.input_method,
            InputMethodState::Normal,
            "Enter must finish the conversion, after {action:?}"
        );
    }

    // 5. Keys are swallowed while converting or under the special overlay
    assert_eq!(
        h.sm.handles_unhandled_keys(),
        state.special_state.is_some() || state.input_method != InputMethodState::Normal
    );
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn state_machine_invariants_hold(actions in prop::collection::vec(arb_key(), 1..120)) {
        let mut h = Harness::new();
        for action in &actions {
            let was_converting = !matches!(h.sm.state().input_method, InputMethodState::Normal);
            h.sm.handle(action);
            assert_invariants(&h, action, was_converting);

            // Every published page contains the selected candidate.
            for update in h.candidates.try_iter() {
                if let Some(c) = update {
                    if let Some(page) = &c.page {
                        prop_assert!(page.words.contains(&c.selected));
                        prop_assert!(page.current_page < page.total_page_count);
                    }
                }
            }
            h.events.try_iter().count();
        }
    }

    #[test]
    fn backspace_empties_composition(text in "[kstnhm]?[aiueo]{1,6}") {
        let mut h = Harness::new();
        let mut chars = text.chars();
        let first = chars.next().unwrap().to_ascii_uppercase();
        h.sm.handle(&Action::key(first));
        for c in chars {
            h.sm.handle(&Action::key(c));
        }
        let InputMethodState::Composing(c) = h.sm.state().input_method.clone() else {
            panic!("expected composing for {text}");
        };
        prop_assert!(c.okuri.is_none());
        for _ in 0..c.text.len() + c.romaji.len() {
            h.sm.handle(&Action::new(KeyEvent::Backspace));
        }
        prop_assert_eq!(h.sm.state().input_method.clone(), InputMethodState::Normal);
        // Nothing is committed along the way.
        let committed: Vec<_> = h
            .events
            .try_iter()
            .filter(|e| matches!(e, crate::InputMethodEvent::FixedText(_)))
            .collect();
        prop_assert!(committed.is_empty());
    }
}
