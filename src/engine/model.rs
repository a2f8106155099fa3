use serde::{Deserialize, Serialize};

use crate::keyboard::keystroke::{Keystroke, KeystrokeMap};
use crate::text::segment;

/// One user-perceived character of the practice text and the keys that type it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphemeInfo {
    pub grapheme: String,
    pub keystrokes: Vec<Keystroke>,
}

impl GraphemeInfo {
    pub fn new(grapheme: impl Into<String>, keystrokes: Vec<Keystroke>) -> Self {
        Self {
            grapheme: grapheme.into(),
            keystrokes,
        }
    }

    /// Typed units this grapheme occupies; an unmapped grapheme still takes one.
    pub fn strokes_needed(&self) -> usize {
        self.keystrokes.len().max(1)
    }
}

pub fn build_grapheme_infos(text: &str, map: &KeystrokeMap) -> Vec<GraphemeInfo> {
    segment(text)
        .into_iter()
        .map(|grapheme| {
            let keystrokes = map.strokes_for_grapheme(&grapheme);
            GraphemeInfo {
                grapheme,
                keystrokes,
            }
        })
        .collect()
}

pub fn total_strokes(graphemes: &[GraphemeInfo]) -> usize {
    graphemes.iter().map(GraphemeInfo::strokes_needed).sum()
}
