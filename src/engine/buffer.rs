use std::fmt;

/// Glyph used when a placeholder is shown to the user.
pub const PLACEHOLDER_GLYPH: char = '\u{2022}';

/// One accepted keystroke's worth of typed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypedUnit {
    Char(char),
    /// Filler standing in for the strokes skipped after a wrong key.
    Placeholder,
}

impl TypedUnit {
    pub fn is_placeholder(self) -> bool {
        matches!(self, TypedUnit::Placeholder)
    }
}

/// The typed buffer of one attempt, one unit per accepted keystroke.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypedBuffer {
    units: Vec<TypedUnit>,
}

impl TypedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[TypedUnit] {
        &self.units
    }

    pub fn push_char(&mut self, ch: char) {
        self.units.push(TypedUnit::Char(ch));
    }

    pub fn push_placeholders(&mut self, count: usize) {
        self.units
            .extend(std::iter::repeat_n(TypedUnit::Placeholder, count));
    }

    /// Undo one keystroke episode: a trailing placeholder run goes together
    /// with the unit before it, otherwise a single unit goes. Returns how many
    /// units were removed.
    pub fn pop_stroke(&mut self) -> usize {
        if self.units.is_empty() {
            return 0;
        }
        let run = self
            .units
            .iter()
            .rev()
            .take_while(|unit| unit.is_placeholder())
            .count();
        let remove = if run > 0 { run + 1 } else { 1 };
        let remove = remove.min(self.units.len());
        self.units.truncate(self.units.len() - remove);
        remove
    }

    pub fn truncate(&mut self, len: usize) {
        self.units.truncate(len);
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }

    /// Typed characters with placeholders dropped.
    pub fn text(&self) -> String {
        units_text(&self.units)
    }
}

/// Characters of `units`, placeholders dropped.
pub fn units_text(units: &[TypedUnit]) -> String {
    units
        .iter()
        .filter_map(|unit| match unit {
            TypedUnit::Char(ch) => Some(*ch),
            TypedUnit::Placeholder => None,
        })
        .collect()
}

impl fmt::Display for TypedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for unit in &self.units {
            match unit {
                TypedUnit::Char(ch) => write!(f, "{ch}")?,
                TypedUnit::Placeholder => write!(f, "{PLACEHOLDER_GLYPH}")?,
            }
        }
        Ok(())
    }
}

impl From<&str> for TypedBuffer {
    fn from(text: &str) -> Self {
        Self {
            units: text.chars().map(TypedUnit::Char).collect(),
        }
    }
}
