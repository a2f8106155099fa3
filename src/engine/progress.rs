use serde::{Deserialize, Serialize};

use crate::engine::model::GraphemeInfo;
use crate::keyboard::keystroke::Keystroke;

/// Cursor position derived from the typed-unit count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingProgress {
    pub char_index: usize,
    pub stroke_index: usize,
}

impl TypingProgress {
    pub fn is_finished(&self, graphemes: &[GraphemeInfo]) -> bool {
        self.char_index >= graphemes.len()
    }
}

/// Walk the model until `total_typed_units` falls inside a grapheme. Once every
/// stroke is accounted for, the cursor sits at `graphemes.len()`.
pub fn get_typing_progress(graphemes: &[GraphemeInfo], total_typed_units: usize) -> TypingProgress {
    let mut remaining = total_typed_units;
    for (char_index, info) in graphemes.iter().enumerate() {
        let strokes = info.strokes_needed();
        if remaining < strokes {
            return TypingProgress {
                char_index,
                stroke_index: remaining,
            };
        }
        remaining -= strokes;
    }
    TypingProgress {
        char_index: graphemes.len(),
        stroke_index: 0,
    }
}

/// The stroke expected at `progress`, if the grapheme there has one.
pub fn expected_keystroke(graphemes: &[GraphemeInfo], progress: TypingProgress) -> Option<&Keystroke> {
    graphemes
        .get(progress.char_index)?
        .keystrokes
        .get(progress.stroke_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::model::total_strokes;

    fn g(grapheme: &str, keys: &[&str]) -> GraphemeInfo {
        GraphemeInfo::new(
            grapheme,
            keys.iter().map(|k| Keystroke::plain(*k)).collect(),
        )
    }

    fn sample() -> Vec<GraphemeInfo> {
        vec![
            g("a", &["a"]),
            g("x", &["f", "a"]),
            g("?", &[]),
            g("y", &["v", "d", "]"]),
        ]
    }

    #[test]
    fn accumulated_strokes_match_typed_units() {
        let model = sample();
        for n in 0..=total_strokes(&model) {
            let p = get_typing_progress(&model, n);
            let before: usize = model[..p.char_index]
                .iter()
                .map(GraphemeInfo::strokes_needed)
                .sum();
            assert_eq!(before + p.stroke_index, n, "typed units {n}");
        }
    }

    #[test]
    fn lands_inside_multi_stroke_grapheme() {
        let model = sample();
        assert_eq!(
            get_typing_progress(&model, 2),
            TypingProgress {
                char_index: 1,
                stroke_index: 1
            }
        );
        // empty keystroke list still occupies one unit
        assert_eq!(
            get_typing_progress(&model, 3),
            TypingProgress {
                char_index: 2,
                stroke_index: 0
            }
        );
    }

    #[test]
    fn terminal_position_past_the_end() {
        let model = sample();
        let total = total_strokes(&model);
        for n in [total, total + 1, total + 50] {
            let p = get_typing_progress(&model, n);
            assert_eq!(
                p,
                TypingProgress {
                    char_index: model.len(),
                    stroke_index: 0
                }
            );
            assert!(p.is_finished(&model));
        }
    }

    #[test]
    fn empty_model_is_already_finished() {
        assert_eq!(get_typing_progress(&[], 0), TypingProgress::default());
        assert_eq!(get_typing_progress(&[], 7), TypingProgress::default());
    }

    #[test]
    fn expected_keystroke_lookup() {
        let model = sample();
        let p = get_typing_progress(&model, 2);
        assert_eq!(expected_keystroke(&model, p), Some(&Keystroke::plain("a")));
        let unmapped = get_typing_progress(&model, 3);
        assert_eq!(expected_keystroke(&model, unmapped), None);
        let done = get_typing_progress(&model, 100);
        assert_eq!(expected_keystroke(&model, done), None);
    }
}
