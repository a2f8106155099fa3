use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::buffer::TypedUnit;
use crate::engine::metrics::{TypingMetrics, calculate_typing_metrics};
use crate::engine::model::GraphemeInfo;
use crate::engine::scoring::{AdvanceDecision, LessonScore, can_advance_lesson, compute_lesson_score};
use crate::session::attempt::AttemptRules;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub metrics: TypingMetrics,
    pub score: LessonScore,
    pub advance: AdvanceDecision,
    pub timestamp: DateTime<Utc>,
}

impl AttemptResult {
    pub fn passed(&self) -> bool {
        self.advance.allowed
    }
}

pub fn compute_results(
    graphemes: &[GraphemeInfo],
    typed: &[TypedUnit],
    duration_ms: u64,
    rules: &AttemptRules,
) -> AttemptResult {
    let metrics = calculate_typing_metrics(graphemes, typed, duration_ms);
    let score = compute_lesson_score(&metrics, &rules.scoring);
    let advance = can_advance_lesson(&metrics, &score, &rules.advance);
    AttemptResult {
        metrics,
        score,
        advance,
        timestamp: Utc::now(),
    }
}
