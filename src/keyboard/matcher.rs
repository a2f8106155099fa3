use serde::{Deserialize, Serialize};

use crate::keyboard::key_input::KeyInput;
use crate::keyboard::keystroke::{Keystroke, KeystrokeMap};
use crate::keyboard::model;

/// Decides whether a key event is the stroke the model expects, and what
/// unit it contributes to the typed buffer.
pub trait KeyMatcher {
    fn matches(&self, expected: &Keystroke, input: &KeyInput) -> bool;

    fn produced_unit(&self, input: &KeyInput) -> Option<char> {
        input.produced_char()
    }
}

/// Physical key code when both sides have one. Events without a code (a
/// terminal on an OS InScript layout) are compared by the character they
/// produce. A Latin key reported with a code is typed as its InScript char.
#[derive(Clone, Copy, Debug)]
pub struct PhysicalKeyMatcher<'a> {
    map: &'a KeystrokeMap,
}

impl<'a> PhysicalKeyMatcher<'a> {
    pub fn new(map: &'a KeystrokeMap) -> Self {
        Self { map }
    }
}

impl KeyMatcher for PhysicalKeyMatcher<'_> {
    fn matches(&self, expected: &Keystroke, input: &KeyInput) -> bool {
        match (model::physical_code(&expected.key), input.code.as_deref()) {
            (Some(code), Some(got)) => input.shift == expected.shift && got == code,
            (Some(_), None) => LayoutCharMatcher::new(self.map).matches(expected, input),
            (None, _) => label_matches(expected, input),
        }
    }

    fn produced_unit(&self, input: &KeyInput) -> Option<char> {
        if input.code.is_some() {
            if let Some(ch) = translate_latin(self.map, input) {
                return Some(ch);
            }
        }
        input.produced_char()
    }
}

fn label_matches(expected: &Keystroke, input: &KeyInput) -> bool {
    input.shift == expected.shift && input.key_label() == expected.key
}

/// The US-board stroke behind a Latin char, shift derived from the symbol.
fn latin_stroke(input: &KeyInput) -> Option<Keystroke> {
    let ch = input.produced_char()?;
    match ch {
        ' ' => Some(Keystroke::new(" ", input.shift)),
        '\n' => Some(Keystroke::new("Enter", input.shift)),
        '\t' => Some(Keystroke::new("Tab", input.shift)),
        _ => model::base_and_shift(ch)
            .map(|(base, shifted)| Keystroke::new(base.to_string(), shifted || input.shift)),
    }
}

fn translate_latin(map: &KeystrokeMap, input: &KeyInput) -> Option<char> {
    latin_stroke(input)
        .and_then(|stroke| map.char_for_stroke(&stroke))
        .and_then(|typed| typed.chars().next())
}

/// For a Latin layout: the Latin key is matched by position and the buffer
/// receives the Malayalam character that stroke would type.
#[derive(Clone, Copy, Debug)]
pub struct EmulatedLayoutMatcher<'a> {
    map: &'a KeystrokeMap,
}

impl<'a> EmulatedLayoutMatcher<'a> {
    pub fn new(map: &'a KeystrokeMap) -> Self {
        Self { map }
    }
}

impl KeyMatcher for EmulatedLayoutMatcher<'_> {
    fn matches(&self, expected: &Keystroke, input: &KeyInput) -> bool {
        latin_stroke(input).is_some_and(|stroke| &stroke == expected)
    }

    fn produced_unit(&self, input: &KeyInput) -> Option<char> {
        translate_latin(self.map, input).or_else(|| input.produced_char())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMatching {
    #[default]
    Physical,
    Layout,
    Emulated,
}

impl KeyMatching {
    pub fn matcher<'a>(self, map: &'a KeystrokeMap) -> Box<dyn KeyMatcher + 'a> {
        match self {
            KeyMatching::Physical => Box::new(PhysicalKeyMatcher::new(map)),
            KeyMatching::Layout => Box::new(LayoutCharMatcher::new(map)),
            KeyMatching::Emulated => Box::new(EmulatedLayoutMatcher::new(map)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::key_input::Key;

    #[test]
    fn physical_prefers_codes() {
        let map = KeystrokeMap::inscript();
        let matcher = PhysicalKeyMatcher::new(&map);
        let expected = Keystroke::plain("k");
        assert!(matcher.matches(&expected, &KeyInput::char('ക').with_code("KeyK")));
        assert!(!matcher.matches(&expected, &KeyInput::char('ക').with_code("KeyL")));
    }

    #[test]
    fn physical_without_code_compares_produced_char() {
        let map = KeystrokeMap::inscript();
        let matcher = PhysicalKeyMatcher::new(&map);
        assert!(matcher.matches(&Keystroke::plain("k"), &KeyInput::char('ക')));
        assert!(matcher.matches(&Keystroke::shifted("n"), &KeyInput::char('ള')));
        assert!(!matcher.matches(&Keystroke::plain("k"), &KeyInput::char('ത')));
        assert!(!matcher.matches(&Keystroke::plain("k"), &KeyInput::char('k')));
    }

    #[test]
    fn physical_types_inscript_chars_for_latin_keys() {
        let map = KeystrokeMap::inscript();
        let matcher = PhysicalKeyMatcher::new(&map);
        let latin = KeyInput::char('k').with_code("KeyK");
        assert!(matcher.matches(&Keystroke::plain("k"), &latin));
        assert_eq!(matcher.produced_unit(&latin), Some('ക'));
        let inscript = KeyInput::char('ക').with_code("KeyK");
        assert_eq!(matcher.produced_unit(&inscript), Some('ക'));
        assert_eq!(matcher.produced_unit(&KeyInput::char('k')), Some('k'));
    }

    #[test]
    fn physical_checks_shift() {
        let map = KeystrokeMap::inscript();
        let matcher = PhysicalKeyMatcher::new(&map);
        let expected = Keystroke::shifted("d");
        let unshifted = KeyInput::char('്').with_code("KeyD");
        let shifted = KeyInput::char('അ').with_code("KeyD").with_shift(true);
        assert!(!matcher.matches(&expected, &unshifted));
        assert!(matcher.matches(&expected, &shifted));
    }

    #[test]
    fn physical_falls_back_to_key_label() {
        let map = KeystrokeMap::inscript();
        let matcher = PhysicalKeyMatcher::new(&map);
        let expected = Keystroke::plain("Escape");
        assert!(matcher.matches(&expected, &KeyInput::new(Key::Escape)));
    }

    #[test]
    fn layout_matcher_compares_produced_chars() {
        let map = KeystrokeMap::inscript();
        let matcher = LayoutCharMatcher::new(&map);
        assert!(matcher.matches(&Keystroke::plain("k"), &KeyInput::char('ക')));
        assert!(!matcher.matches(&Keystroke::plain("k"), &KeyInput::char('ത')));
        assert!(matcher.matches(&Keystroke::shifted("d"), &KeyInput::char('അ')));
        assert!(matcher.matches(&Keystroke::plain(" "), &KeyInput::char(' ')));
    }

    #[test]
    fn emulated_matcher_translates_latin_keys() {
        let map = KeystrokeMap::inscript();
        let matcher = EmulatedLayoutMatcher::new(&map);
        assert!(matcher.matches(&Keystroke::plain("k"), &KeyInput::char('k')));
        assert!(matcher.matches(&Keystroke::shifted("n"), &KeyInput::char('N')));
        assert!(matcher.matches(&Keystroke::shifted("-"), &KeyInput::char('_')));
        assert!(!matcher.matches(&Keystroke::plain("k"), &KeyInput::char('K')));
        assert_eq!(matcher.produced_unit(&KeyInput::char('k')), Some('ക'));
        assert_eq!(matcher.produced_unit(&KeyInput::char('N')), Some('ള'));
        assert_eq!(matcher.produced_unit(&KeyInput::char(' ')), Some(' '));
        // no table entry for shift+9: the raw char is kept
        assert_eq!(matcher.produced_unit(&KeyInput::char('(')), Some('('));
    }

    #[test]
    fn key_matching_parses_lowercase() {
        let parsed: KeyMatching = serde_json::from_str("\"emulated\"").unwrap();
        assert_eq!(parsed, KeyMatching::Emulated);
    }
}
