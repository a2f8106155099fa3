use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::engine::buffer::TypedBuffer;
use crate::engine::model::{GraphemeInfo, build_grapheme_infos, total_strokes};
use crate::engine::progress::{self, TypingProgress};
use crate::engine::scoring::{AdvanceThresholds, ScoreOptions};
use crate::keyboard::display::{KeyHint, key_hint};
use crate::keyboard::keystroke::{Keystroke, KeystrokeMap};
use crate::session::result::{AttemptResult, compute_results};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Prestart,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttemptRules {
    pub allow_backspace: bool,
    pub scoring: ScoreOptions,
    pub advance: AdvanceThresholds,
}

impl Default for AttemptRules {
    fn default() -> Self {
        Self {
            allow_backspace: true,
            scoring: ScoreOptions::default(),
            advance: AdvanceThresholds::default(),
        }
    }
}

/// One typing attempt over a fixed text. The grapheme model is built once and
/// never mutated; only the buffer, stage and timestamps change.
pub struct Attempt {
    pub text: String,
    pub graphemes: Vec<GraphemeInfo>,
    pub buffer: TypedBuffer,
    pub stage: Stage,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    pub rules: AttemptRules,
    pub result: Option<AttemptResult>,
    total_strokes: usize,
}

impl Attempt {
    pub fn new(text: &str, map: &KeystrokeMap, rules: AttemptRules) -> Self {
        let graphemes = build_grapheme_infos(text, map);
        Self::from_graphemes(text, graphemes, rules)
    }

    pub fn from_graphemes(text: &str, graphemes: Vec<GraphemeInfo>, rules: AttemptRules) -> Self {
        let total_strokes = total_strokes(&graphemes);
        Self {
            text: text.to_string(),
            graphemes,
            buffer: TypedBuffer::new(),
            stage: Stage::Prestart,
            started_at: None,
            finished_at: None,
            rules,
            result: None,
            total_strokes,
        }
    }

    pub fn total_strokes(&self) -> usize {
        self.total_strokes
    }

    pub fn progress(&self) -> TypingProgress {
        progress::get_typing_progress(&self.graphemes, self.buffer.len())
    }

    pub fn is_complete(&self) -> bool {
        self.progress().char_index >= self.graphemes.len()
    }

    pub fn expected_keystroke(&self) -> Option<&Keystroke> {
        progress::expected_keystroke(&self.graphemes, self.progress())
    }

    pub fn next_key_hint(&self) -> Option<KeyHint> {
        self.expected_keystroke().map(key_hint)
    }

    pub fn start(&mut self, now: Instant) {
        if self.stage == Stage::Prestart {
            self.stage = Stage::Running;
            self.started_at = Some(now);
        }
    }

    /// Back to prestart with an empty buffer, from any stage.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.stage = Stage::Prestart;
        self.started_at = None;
        self.finished_at = None;
        self.result = None;
    }

    /// Stops the clock and computes the result. Calling it again is a no-op.
    pub fn finish(&mut self, now: Instant) -> &AttemptResult {
        if self.result.is_none() {
            self.stage = Stage::Finished;
            self.finished_at = Some(now);
        }
        let elapsed_ms = self.elapsed_ms(now);
        let graphemes = &self.graphemes;
        let units = self.buffer.units();
        let rules = &self.rules;
        self.result.get_or_insert_with(|| {
            let result = compute_results(graphemes, units, elapsed_ms, rules);
            tracing::debug!(
                wpm = result.metrics.wpm,
                accuracy = result.metrics.accuracy,
                score = result.score.score,
                allowed = result.advance.allowed,
                "attempt finished"
            );
            result
        })
    }

    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        let end = self.finished_at.unwrap_or(now);
        match self.started_at {
            Some(start) => end.saturating_duration_since(start).as_millis() as u64,
            None => 0,
        }
    }

    /// Fraction of required strokes typed so far, in [0, 1].
    pub fn completion(&self) -> f64 {
        if self.total_strokes == 0 {
            return 1.0;
        }
        (self.buffer.len() as f64 / self.total_strokes as f64).min(1.0)
    }
}
