pub mod buffer;
pub mod metrics;
pub mod model;
pub mod progress;
pub mod scoring;

pub use buffer::{PLACEHOLDER_GLYPH, TypedBuffer, TypedUnit};
pub use metrics::{TypingMetrics, calculate_typing_metrics};
pub use model::{GraphemeInfo, build_grapheme_infos, total_strokes};
pub use progress::{TypingProgress, get_typing_progress};
pub use scoring::{
    AdvanceDecision, AdvanceThresholds, LessonScore, ScoreOptions, can_advance_lesson,
    compute_lesson_score,
};
