use serde::{Deserialize, Serialize};

use crate::engine::buffer::{TypedUnit, units_text};
use crate::engine::model::GraphemeInfo;
use crate::text::{grapheme_count, normalize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypingMetrics {
    pub duration_ms: u64,
    pub wpm: f64,
    pub raw_wpm: f64,
    pub accuracy: f64,
    pub correct: usize,
    pub incorrect: usize,
    pub extra: usize,
    pub missed: usize,
    pub total_typed: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphemeStatus {
    Correct,
    Incorrect,
    Missed,
}

/// Per-grapheme verdicts plus the typed units left over after the last grapheme.
pub fn classify_graphemes<'a>(
    graphemes: &[GraphemeInfo],
    typed: &'a [TypedUnit],
) -> (Vec<GraphemeStatus>, &'a [TypedUnit]) {
    let mut pos = 0;
    let mut statuses = Vec::with_capacity(graphemes.len());
    for info in graphemes {
        let end = (pos + info.strokes_needed()).min(typed.len());
        let chunk = &typed[pos..end];
        pos = end;

        let status = if chunk.is_empty() {
            GraphemeStatus::Missed
        } else if normalize(&units_text(chunk)) == normalize(&info.grapheme) {
            GraphemeStatus::Correct
        } else {
            GraphemeStatus::Incorrect
        };
        statuses.push(status);
    }
    (statuses, &typed[pos..])
}

/// Final numbers for an attempt. Words are five graphemes, not five keystrokes.
pub fn calculate_typing_metrics(
    graphemes: &[GraphemeInfo],
    typed: &[TypedUnit],
    duration_ms: u64,
) -> TypingMetrics {
    let duration_ms = duration_ms.max(1);
    let minutes = duration_ms as f64 / 60_000.0;

    let (statuses, leftover) = classify_graphemes(graphemes, typed);
    let count = |wanted: GraphemeStatus| statuses.iter().filter(|s| **s == wanted).count();
    let correct = count(GraphemeStatus::Correct);
    let incorrect = count(GraphemeStatus::Incorrect);
    let missed = count(GraphemeStatus::Missed);
    let extra = grapheme_count(&units_text(leftover));

    let total_typed = correct + incorrect + extra;
    let raw_wpm = total_typed as f64 / 5.0 / minutes;
    let wpm = correct as f64 / 5.0 / minutes;
    let accuracy = if total_typed > 0 {
        correct as f64 / total_typed as f64 * 100.0
    } else {
        0.0
    };

    TypingMetrics {
        duration_ms,
        wpm,
        raw_wpm,
        accuracy,
        correct,
        incorrect,
        extra,
        missed,
        total_typed,
    }
}
