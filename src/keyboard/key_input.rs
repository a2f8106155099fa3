use crate::text::script::is_latin_letter;

/// Unit appended for key events that produce no character.
pub const UNKNOWN_UNIT: char = '\u{FFFD}';

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    /// Shift, Control, Alt, Meta or a lock key pressed on its own.
    Modifier,
    Other(String),
}

/// One raw key-down event as delivered by the caller's input layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    /// Physical key code (`"KeyK"`, `"Space"`), when the platform reports one.
    pub code: Option<String>,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            code: None,
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    pub fn char(ch: char) -> Self {
        Self::new(Key::Char(ch))
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    pub fn has_command_modifier(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }

    /// The text unit this key types, if any.
    pub fn produced_char(&self) -> Option<char> {
        match self.key {
            Key::Char(ch) => Some(ch),
            Key::Enter => Some('\n'),
            Key::Tab => Some('\t'),
            _ => None,
        }
    }

    /// `KeyboardEvent.key`-style label.
    pub fn key_label(&self) -> String {
        match &self.key {
            Key::Char(ch) => ch.to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Backspace => "Backspace".to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Modifier => "Shift".to_string(),
            Key::Other(name) => name.clone(),
        }
    }

    /// A bare Latin letter usually means the OS layout is not Malayalam.
    pub fn suggests_latin_layout(&self) -> bool {
        matches!(self.key, Key::Char(ch) if is_latin_letter(ch)) && !self.has_command_modifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produced_chars() {
        assert_eq!(KeyInput::char('ക').produced_char(), Some('ക'));
        assert_eq!(KeyInput::new(Key::Enter).produced_char(), Some('\n'));
        assert_eq!(KeyInput::new(Key::Tab).produced_char(), Some('\t'));
        assert_eq!(KeyInput::new(Key::Escape).produced_char(), None);
        assert_eq!(
            KeyInput::new(Key::Other("ArrowLeft".into())).produced_char(),
            None
        );
    }

    #[test]
    fn latin_layout_detection() {
        assert!(KeyInput::char('k').suggests_latin_layout());
        assert!(!KeyInput::char('ക').suggests_latin_layout());
        assert!(!KeyInput::char('k').with_ctrl(true).suggests_latin_layout());
    }
}
