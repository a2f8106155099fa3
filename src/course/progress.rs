use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::metrics::TypingMetrics;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    #[default]
    Letters,
    Paragraph,
    Common,
    Course,
}

impl PracticeMode {
    pub fn to_key(self) -> &'static str {
        match self {
            PracticeMode::Letters => "letters",
            PracticeMode::Paragraph => "paragraph",
            PracticeMode::Common => "common",
            PracticeMode::Course => "course",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "letters" => Some(PracticeMode::Letters),
            "paragraph" => Some(PracticeMode::Paragraph),
            "common" => Some(PracticeMode::Common),
            "course" => Some(PracticeMode::Course),
            _ => None,
        }
    }

    pub fn all() -> &'static [PracticeMode] {
        &[
            PracticeMode::Letters,
            PracticeMode::Paragraph,
            PracticeMode::Common,
            PracticeMode::Course,
        ]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PracticeMode::Letters => "Letters",
            PracticeMode::Paragraph => "Paragraph",
            PracticeMode::Common => "Common words",
            PracticeMode::Course => "Course",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeProgress {
    pub runs: u32,
    pub best_wpm: f64,
    pub best_acc: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonProgress {
    pub runs: u32,
    pub best_wpm: f64,
    pub best_acc: f64,
    pub last_time: Option<DateTime<Utc>>,
}

/// Best results per practice mode and per course lesson. The caller owns storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppProgress {
    pub modes: BTreeMap<PracticeMode, ModeProgress>,
    pub lessons: BTreeMap<String, LessonProgress>,
}

impl AppProgress {
    pub fn lesson(&self, id: &str) -> Option<&LessonProgress> {
        self.lessons.get(id)
    }

    pub fn mode(&self, mode: PracticeMode) -> Option<&ModeProgress> {
        self.modes.get(&mode)
    }
}

/// Previous-lesson results needed to unlock the next course lesson.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnlockRequirements {
    pub wpm: f64,
    pub accuracy: f64,
}

impl Default for UnlockRequirements {
    fn default() -> Self {
        Self {
            wpm: 25.0,
            accuracy: 90.0,
        }
    }
}

/// Returns `prev` with one more run recorded for `mode` and, in course mode,
/// for `lesson_id`.
pub fn apply_result_to_progress(
    prev: &AppProgress,
    mode: PracticeMode,
    metrics: &TypingMetrics,
    lesson_id: Option<&str>,
    now: DateTime<Utc>,
) -> AppProgress {
    let mut next = prev.clone();

    let mp = next.modes.entry(mode).or_default();
    mp.runs += 1;
    mp.best_wpm = mp.best_wpm.max(metrics.wpm);
    mp.best_acc = mp.best_acc.max(metrics.accuracy);

    if let (PracticeMode::Course, Some(id)) = (mode, lesson_id) {
        let lp = next.lessons.entry(id.to_string()).or_default();
        lp.runs += 1;
        lp.best_wpm = lp.best_wpm.max(metrics.wpm);
        lp.best_acc = lp.best_acc.max(metrics.accuracy);
        lp.last_time = Some(now);
    }

    next
}
