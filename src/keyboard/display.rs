//! Display adapter for the key a caller should highlight next.
use crate::keyboard::finger::FingerAssignment;
use crate::keyboard::keystroke::Keystroke;
use crate::keyboard::model;

/// Human-readable name for named keys. Returns `""` for printable keys.
pub fn key_display_name(key: &str) -> &'static str {
    match key {
        " " => "Space",
        "Enter" => "Enter",
        "Tab" => "Tab",
        "Backspace" => "Backspace",
        _ => "",
    }
}

/// Keycap label: letters upper-cased, symbol keys show both legends ("[ {").
pub fn keycap_label(key: &str) -> String {
    let named = key_display_name(key);
    if !named.is_empty() {
        return named.to_string();
    }
    let mut chars = key.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return key.to_string();
    };
    if ch.is_ascii_alphanumeric() {
        return ch.to_ascii_uppercase().to_string();
    }
    match model::physical_key_for(ch) {
        Some(pk) => format!("{} {}", pk.base, pk.shifted),
        None => key.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyHint {
    pub keystroke: Keystroke,
    pub finger: FingerAssignment,
    pub label: String,
}

impl KeyHint {
    pub fn describe(&self) -> String {
        if self.keystroke.shift {
            format!("Shift + {} ({})", self.label, self.finger)
        } else {
            format!("{} ({})", self.label, self.finger)
        }
    }
}

pub fn key_hint(stroke: &Keystroke) -> KeyHint {
    KeyHint {
        keystroke: stroke.clone(),
        finger: model::finger_for_key(&stroke.key),
        label: keycap_label(&stroke.key),
    }
}
