use serde::{Deserialize, Serialize};

use crate::engine::metrics::TypingMetrics;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub wpm: f64,
    pub raw_wpm: f64,
    pub accuracy: f64,
    pub completeness: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            wpm: 0.35,
            raw_wpm: 0.20,
            accuracy: 0.35,
            completeness: 0.10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreOptions {
    pub wpm_cap: f64,
    pub raw_wpm_cap: f64,
    pub missing_cap: f64,
    pub weights: ScoreWeights,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            wpm_cap: 100.0,
            raw_wpm_cap: 120.0,
            missing_cap: 10.0,
            weights: ScoreWeights::default(),
        }
    }
}

/// Each sub-score on the same 0-100 scale as the combined score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreParts {
    pub wpm_score: u32,
    pub raw_score: u32,
    pub acc_score: u32,
    pub completeness_score: u32,
    pub missing: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonScore {
    pub score: u32,
    pub parts: ScoreParts,
}

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// `value / cap` clamped to [0, 1]. A non-positive cap yields 0.
pub fn normalize_to_01(value: f64, cap: f64) -> f64 {
    if cap <= 0.0 {
        return 0.0;
    }
    clamp01(value / cap)
}

pub fn compute_lesson_score(metrics: &TypingMetrics, options: &ScoreOptions) -> LessonScore {
    let wpm_score = normalize_to_01(metrics.wpm, options.wpm_cap);
    let raw_score = normalize_to_01(metrics.raw_wpm, options.raw_wpm_cap);
    let acc_score = clamp01(metrics.accuracy / 100.0);
    let completeness_score = if options.missing_cap > 0.0 {
        clamp01(1.0 - metrics.missed as f64 / options.missing_cap)
    } else if metrics.missed == 0 {
        1.0
    } else {
        0.0
    };

    let w = &options.weights;
    let combined = wpm_score * w.wpm
        + raw_score * w.raw_wpm
        + acc_score * w.accuracy
        + completeness_score * w.completeness;

    LessonScore {
        score: percent(combined),
        parts: ScoreParts {
            wpm_score: percent(wpm_score),
            raw_score: percent(raw_score),
            acc_score: percent(acc_score),
            completeness_score: percent(completeness_score),
            missing: metrics.missed,
        },
    }
}

fn percent(x01: f64) -> u32 {
    (clamp01(x01) * 100.0).round() as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvanceThresholds {
    pub advance_threshold: u32,
    pub min_accuracy: f64,
    pub max_missing: usize,
    pub min_raw_wpm: f64,
    pub min_wpm: Option<f64>,
}

impl Default for AdvanceThresholds {
    fn default() -> Self {
        Self {
            advance_threshold: 75,
            min_accuracy: 85.0,
            max_missing: 3,
            min_raw_wpm: 6.0,
            min_wpm: None,
        }
    }
}

impl AdvanceThresholds {
    /// Thresholds any finished attempt satisfies.
    pub fn permissive() -> Self {
        Self {
            advance_threshold: 0,
            min_accuracy: 0.0,
            max_missing: usize::MAX,
            min_raw_wpm: 0.0,
            min_wpm: None,
        }
    }
}

/// Pass flag for each advance check. `wpm_ok` is true when no minimum WPM applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceReasons {
    pub score_ok: bool,
    pub acc_ok: bool,
    pub missing_ok: bool,
    pub raw_ok: bool,
    pub wpm_ok: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceDecision {
    pub allowed: bool,
    pub reasons: AdvanceReasons,
}

impl AdvanceDecision {
    /// Human-readable list of the checks that failed.
    pub fn failures(&self, thresholds: &AdvanceThresholds) -> Vec<String> {
        let r = &self.reasons;
        let mut out = Vec::new();
        if !r.score_ok {
            out.push(format!("score below {}", thresholds.advance_threshold));
        }
        if !r.acc_ok {
            out.push(format!("accuracy below {}%", thresholds.min_accuracy));
        }
        if !r.missing_ok {
            out.push(format!("more than {} missed", thresholds.max_missing));
        }
        if !r.raw_ok {
            out.push(format!("raw WPM below {}", thresholds.min_raw_wpm));
        }
        if let (false, Some(min)) = (r.wpm_ok, thresholds.min_wpm) {
            out.push(format!("WPM below {min}"));
        }
        out
    }
}

pub fn can_advance_lesson(
    metrics: &TypingMetrics,
    computed: &LessonScore,
    thresholds: &AdvanceThresholds,
) -> AdvanceDecision {
    let reasons = AdvanceReasons {
        score_ok: computed.score >= thresholds.advance_threshold,
        acc_ok: metrics.accuracy >= thresholds.min_accuracy,
        missing_ok: metrics.missed <= thresholds.max_missing,
        raw_ok: metrics.raw_wpm >= thresholds.min_raw_wpm,
        wpm_ok: thresholds.min_wpm.is_none_or(|min| metrics.wpm >= min),
    };
    AdvanceDecision {
        allowed: reasons.score_ok
            && reasons.acc_ok
            && reasons.missing_ok
            && reasons.raw_ok
            && reasons.wpm_ok,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(wpm: f64, raw_wpm: f64, accuracy: f64, missed: usize) -> TypingMetrics {
        TypingMetrics {
            wpm,
            raw_wpm,
            accuracy,
            missed,
            ..TypingMetrics::default()
        }
    }

    #[test]
    fn fast_accurate_attempt_advances() {
        let m = metrics(80.0, 90.0, 96.0, 0);
        let score = compute_lesson_score(&m, &ScoreOptions::default());
        // 0.8*0.35 + 0.75*0.20 + 0.96*0.35 + 1.0*0.10 = 0.866
        assert_eq!(score.score, 87);
        assert_eq!(
            score.parts,
            ScoreParts {
                wpm_score: 80,
                raw_score: 75,
                acc_score: 96,
                completeness_score: 100,
                missing: 0,
            }
        );
        let decision = can_advance_lesson(&m, &score, &AdvanceThresholds::default());
        assert!(decision.allowed);
        assert!(decision.failures(&AdvanceThresholds::default()).is_empty());
    }

    #[test]
    fn sub_scores_are_capped() {
        let m = metrics(500.0, 500.0, 100.0, 0);
        let score = compute_lesson_score(&m, &ScoreOptions::default());
        assert_eq!(score.score, 100);
        assert_eq!(score.parts.wpm_score, 100);
        assert_eq!(score.parts.raw_score, 100);
        assert_eq!(score.parts.acc_score, 100);
    }

    #[test]
    fn completeness_drops_with_missed() {
        let m = metrics(0.0, 0.0, 0.0, 5);
        let score = compute_lesson_score(&m, &ScoreOptions::default());
        assert_eq!(score.parts.completeness_score, 50);
        assert_eq!(score.score, 5);

        let all_missed = metrics(0.0, 0.0, 0.0, 40);
        let score = compute_lesson_score(&all_missed, &ScoreOptions::default());
        assert_eq!(score.parts.completeness_score, 0);
        assert_eq!(score.score, 0);
    }

    #[test]
    fn zero_missing_cap_does_not_divide() {
        let options = ScoreOptions {
            missing_cap: 0.0,
            ..ScoreOptions::default()
        };
        let clean = compute_lesson_score(&metrics(0.0, 0.0, 0.0, 0), &options);
        assert_eq!(clean.parts.completeness_score, 100);
        let dirty = compute_lesson_score(&metrics(0.0, 0.0, 0.0, 1), &options);
        assert_eq!(dirty.parts.completeness_score, 0);
    }

    #[test]
    fn each_failed_check_is_reported() {
        let m = metrics(10.0, 5.0, 70.0, 4);
        let score = compute_lesson_score(&m, &ScoreOptions::default());
        let thresholds = AdvanceThresholds::default();
        let decision = can_advance_lesson(&m, &score, &thresholds);
        assert!(!decision.allowed);
        assert!(!decision.reasons.score_ok);
        assert!(!decision.reasons.acc_ok);
        assert!(!decision.reasons.missing_ok);
        assert!(!decision.reasons.raw_ok);
        assert!(decision.reasons.wpm_ok);
        assert_eq!(decision.failures(&thresholds).len(), 4);
    }

    #[test]
    fn optional_min_wpm_is_enforced() {
        let m = metrics(80.0, 90.0, 96.0, 0);
        let score = compute_lesson_score(&m, &ScoreOptions::default());
        let thresholds = AdvanceThresholds {
            min_wpm: Some(90.0),
            ..AdvanceThresholds::default()
        };
        let decision = can_advance_lesson(&m, &score, &thresholds);
        assert!(!decision.allowed);
        assert!(!decision.reasons.wpm_ok);
        assert_eq!(decision.failures(&thresholds), vec!["WPM below 90".to_string()]);
    }

    #[test]
    fn permissive_thresholds_pass_anything() {
        let m = metrics(0.0, 0.0, 0.0, 12);
        let score = compute_lesson_score(&m, &ScoreOptions::default());
        assert!(can_advance_lesson(&m, &score, &AdvanceThresholds::permissive()).allowed);
    }

    #[test]
    fn weights_and_thresholds_load_from_partial_toml() {
        let options: ScoreOptions = toml::from_str("wpm_cap = 50.0\n[weights]\nwpm = 1.0\n").unwrap();
        assert_eq!(options.wpm_cap, 50.0);
        assert_eq!(options.raw_wpm_cap, 120.0);
        assert_eq!(options.weights.wpm, 1.0);
        assert_eq!(options.weights.accuracy, 0.35);
    }
}
