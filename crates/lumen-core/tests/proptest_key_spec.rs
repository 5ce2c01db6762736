//! Property-based tests for key spec parsing.
//!
//! 1. Parsing never panics on arbitrary input.
//! 2. Any event rendered with `Display` parses back to the same event.

use lumen_core::event::{KeyCode, KeyEvent, Modifiers};
use proptest::prelude::*;

fn key_code_strategy() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        proptest::char::range('a', 'z').prop_map(KeyCode::Char),
        proptest::char::range('0', '9').prop_map(KeyCode::Char),
        Just(KeyCode::Enter),
        Just(KeyCode::Escape),
        Just(KeyCode::Backspace),
        Just(KeyCode::Tab),
        Just(KeyCode::BackTab),
        Just(KeyCode::Home),
        Just(KeyCode::End),
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        (1u8..=24).prop_map(KeyCode::F),
    ]
}

fn modifiers_strategy() -> impl Strategy<Value = Modifiers> {
    (0u8..16).prop_map(Modifiers::from_bits_truncate)
}

proptest! {
    #[test]
    fn parse_never_panics(spec in ".{0,24}") {
        let _ = spec.parse::<KeyEvent>();
    }

    #[test]
    fn display_parses_back(code in key_code_strategy(), modifiers in modifiers_strategy()) {
        // Shift+Tab is normalised to BackTab, so skip that pairing.
        prop_assume!(!(code == KeyCode::Tab && modifiers.contains(Modifiers::SHIFT)));
        let event = KeyEvent::new(code).with_modifiers(modifiers);
        let spec = event.to_string();
        prop_assert_eq!(spec.parse::<KeyEvent>(), Ok(event), "spec={}", spec);
    }
}
