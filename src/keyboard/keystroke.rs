use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::assets;
use crate::error::{Error, Result};

/// One physical key press: the base key and whether shift is held.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keystroke {
    pub key: String,
    #[serde(default)]
    pub shift: bool,
}

impl Keystroke {
    pub fn new(key: impl Into<String>, shift: bool) -> Self {
        Self {
            key: key.into(),
            shift,
        }
    }

    pub fn plain(key: impl Into<String>) -> Self {
        Self::new(key, false)
    }

    pub fn shifted(key: impl Into<String>) -> Self {
        Self::new(key, true)
    }
}

/// Table entry: the base stroke for a character plus any trailing strokes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharMapping {
    pub key: String,
    #[serde(default)]
    pub shift: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post: Vec<Keystroke>,
}

impl CharMapping {
    pub fn new(stroke: Keystroke) -> Self {
        Self {
            key: stroke.key,
            shift: stroke.shift,
            post: Vec::new(),
        }
    }

    pub fn with_post(mut self, post: Vec<Keystroke>) -> Self {
        self.post = post;
        self
    }

    pub fn strokes(&self) -> Vec<Keystroke> {
        let mut strokes = Vec::with_capacity(1 + self.post.len());
        strokes.push(Keystroke::new(self.key.clone(), self.shift));
        strokes.extend(self.post.iter().cloned());
        strokes
    }
}

/// Character -> keystroke table for one input layout.
#[derive(Clone, Debug, Default)]
pub struct KeystrokeMap {
    entries: HashMap<String, CharMapping>,
    reverse: HashMap<Keystroke, String>,
}

impl KeystrokeMap {
    pub fn new(entries: HashMap<String, CharMapping>) -> Self {
        let mut map = Self {
            entries,
            reverse: HashMap::new(),
        };
        map.rebuild_reverse();
        map
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, CharMapping> =
            serde_json::from_str(json).map_err(|e| Error::json("keystroke map", e))?;
        Ok(Self::new(entries))
    }

    /// The bundled Malayalam InScript table. A broken bundle degrades to an
    /// empty table, which leaves every grapheme with zero strokes.
    pub fn inscript() -> Self {
        match assets::load_json::<HashMap<String, CharMapping>>(assets::INSCRIPT_MAP) {
            Ok(entries) => Self::new(entries),
            Err(err) => {
                tracing::warn!(error = %err, "falling back to an empty keystroke map");
                Self::default()
            }
        }
    }

    pub fn with_entry(mut self, ch: impl Into<String>, mapping: CharMapping) -> Self {
        self.entries.insert(ch.into(), mapping);
        self.rebuild_reverse();
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, ch: &str) -> Option<&CharMapping> {
        self.entries.get(ch)
    }

    pub fn strokes_for_char(&self, ch: &str) -> Vec<Keystroke> {
        self.entries
            .get(ch)
            .map(CharMapping::strokes)
            .unwrap_or_default()
    }

    /// Strokes for a whole cluster: a direct entry wins, otherwise each code
    /// point is looked up on its own and the results are concatenated.
    pub fn strokes_for_grapheme(&self, grapheme: &str) -> Vec<Keystroke> {
        let direct = self.strokes_for_char(grapheme);
        if !direct.is_empty() {
            return direct;
        }
        let mut buf = [0u8; 4];
        grapheme
            .chars()
            .flat_map(|ch| self.strokes_for_char(ch.encode_utf8(&mut buf)))
            .collect()
    }

    /// What a single stroke types, for entries that need exactly one stroke.
    pub fn char_for_stroke(&self, stroke: &Keystroke) -> Option<&str> {
        self.reverse.get(stroke).map(String::as_str)
    }

    fn rebuild_reverse(&mut self) {
        // Sorted so that duplicate strokes resolve the same way every run.
        let sorted: BTreeMap<&String, &CharMapping> = self.entries.iter().collect();
        self.reverse.clear();
        for (ch, mapping) in sorted {
            if mapping.post.is_empty() {
                self.reverse
                    .entry(Keystroke::new(mapping.key.clone(), mapping.shift))
                    .or_insert_with(|| ch.clone());
            }
        }
    }
}
