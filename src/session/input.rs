use std::time::Instant;

use crate::engine::model::GraphemeInfo;
use crate::engine::progress;
use crate::keyboard::key_input::{Key, KeyInput, UNKNOWN_UNIT};
use crate::keyboard::matcher::KeyMatcher;
use crate::session::attempt::{Attempt, Stage};

/// Key-down verdict for the stroke at the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeCheck {
    pub wrong: bool,
    /// Placeholders to append after the typed unit so the cursor skips the
    /// rest of the grapheme.
    pub fill: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Correct,
    Wrong { fill: usize },
    Erased(usize),
    /// Backspace while running with backspace disabled.
    Rejected,
}

/// Compares `input` with the stroke expected after `typed_len` units.
/// Returns `None` once every grapheme is accounted for.
pub fn check_keystroke(
    graphemes: &[GraphemeInfo],
    typed_len: usize,
    matcher: &dyn KeyMatcher,
    input: &KeyInput,
) -> Option<StrokeCheck> {
    let at = progress::get_typing_progress(graphemes, typed_len);
    let info = graphemes.get(at.char_index)?;
    // a grapheme with no known strokes accepts whatever is typed
    let matched = info
        .keystrokes
        .get(at.stroke_index)
        .is_none_or(|expected| matcher.matches(expected, input));
    if matched {
        return Some(StrokeCheck {
            wrong: false,
            fill: 0,
        });
    }
    Some(StrokeCheck {
        wrong: true,
        fill: info.keystrokes.len().saturating_sub(at.stroke_index + 1),
    })
}

/// Appends `unit` and the check's placeholders, then finishes the attempt if
/// the cursor reached the end.
pub fn apply_stroke(attempt: &mut Attempt, unit: char, check: StrokeCheck, now: Instant) {
    attempt.buffer.push_char(unit);
    if check.wrong {
        attempt.buffer.push_placeholders(check.fill);
        tracing::debug!(?unit, fill = check.fill, "wrong stroke");
    }
    cap_and_maybe_finish(attempt, now);
}

pub fn process_key(
    attempt: &mut Attempt,
    matcher: &dyn KeyMatcher,
    input: &KeyInput,
    now: Instant,
) -> KeyOutcome {
    if attempt.stage == Stage::Finished {
        return KeyOutcome::Ignored;
    }
    if input.has_command_modifier() {
        return KeyOutcome::Ignored;
    }
    match input.key {
        Key::Modifier | Key::Escape => return KeyOutcome::Ignored,
        Key::Backspace => return process_backspace(attempt),
        _ => {}
    }

    let Some(check) = check_keystroke(&attempt.graphemes, attempt.buffer.len(), matcher, input)
    else {
        return KeyOutcome::Ignored;
    };

    attempt.start(now);
    let unit = matcher.produced_unit(input).unwrap_or(UNKNOWN_UNIT);
    apply_stroke(attempt, unit, check, now);

    if check.wrong {
        KeyOutcome::Wrong { fill: check.fill }
    } else {
        KeyOutcome::Correct
    }
}

/// Removes the last stroke: a trailing placeholder run goes together with the
/// unit that caused it.
pub fn process_backspace(attempt: &mut Attempt) -> KeyOutcome {
    match attempt.stage {
        Stage::Finished => KeyOutcome::Ignored,
        Stage::Running if !attempt.rules.allow_backspace => KeyOutcome::Rejected,
        _ => {
            let removed = attempt.buffer.pop_stroke();
            if removed > 1 {
                tracing::debug!(removed, "erased wrong stroke with placeholders");
            }
            KeyOutcome::Erased(removed)
        }
    }
}

/// Input-change path for IME commits and pastes: every char becomes one unit.
pub fn apply_text(attempt: &mut Attempt, text: &str, now: Instant) {
    if attempt.stage == Stage::Finished || text.is_empty() {
        return;
    }
    attempt.start(now);
    for ch in text.chars() {
        attempt.buffer.push_char(ch);
    }
    cap_and_maybe_finish(attempt, now);
}

fn cap_and_maybe_finish(attempt: &mut Attempt, now: Instant) {
    let total = attempt.total_strokes();
    if attempt.buffer.len() > total {
        tracing::debug!(len = attempt.buffer.len(), total, "truncating over-long input");
        attempt.buffer.truncate(total);
    }
    if attempt.is_complete() {
        attempt.finish(now);
    }
}
