pub mod attempt;
pub mod input;
pub mod result;

pub use attempt::{Attempt, AttemptRules, Stage};
pub use input::{
    KeyOutcome, StrokeCheck, apply_stroke, apply_text, check_keystroke, process_backspace,
    process_key,
};
pub use result::{AttemptResult, compute_results};
