use serde::{Deserialize, Deserializer, Serialize};

use crate::assets;
use crate::course::progress::{AppProgress, LessonProgress, UnlockRequirements};
use crate::engine::scoring::AdvanceThresholds;
use crate::error::{Error, Result};

/// How a course lesson is passed. Numeric fields accept `"auto"` in JSON,
/// which leaves the configured default in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PassCriteria {
    #[default]
    Completed,
    Performance {
        #[serde(
            rename = "wpm",
            default,
            deserialize_with = "auto_number",
            skip_serializing_if = "Option::is_none"
        )]
        min_wpm: Option<f64>,
        #[serde(
            rename = "accuracy_percentage",
            default,
            deserialize_with = "auto_number",
            skip_serializing_if = "Option::is_none"
        )]
        min_accuracy: Option<f64>,
        #[serde(
            default,
            deserialize_with = "auto_number",
            skip_serializing_if = "Option::is_none"
        )]
        min_score: Option<f64>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AutoOrNumber {
    Number(f64),
    Text(String),
}

fn auto_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AutoOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AutoOrNumber::Number(n)) => Ok(Some(n)),
        Some(AutoOrNumber::Text(s)) if s.eq_ignore_ascii_case("auto") => Ok(None),
        Some(AutoOrNumber::Text(s)) => Err(serde::de::Error::custom(format!(
            "expected a number or \"auto\", got {s:?}"
        ))),
    }
}

impl PassCriteria {
    /// Concrete thresholds for this lesson, filling unset fields from `defaults`.
    pub fn resolve(&self, defaults: &AdvanceThresholds) -> AdvanceThresholds {
        match self {
            PassCriteria::Completed => AdvanceThresholds::permissive(),
            PassCriteria::Performance {
                min_wpm,
                min_accuracy,
                min_score,
            } => AdvanceThresholds {
                advance_threshold: min_score
                    .map(|s| s.round().clamp(0.0, 100.0) as u32)
                    .unwrap_or(defaults.advance_threshold),
                min_accuracy: min_accuracy.unwrap_or(defaults.min_accuracy),
                min_wpm: min_wpm.or(defaults.min_wpm),
                ..*defaults
            },
        }
    }
}

/// Per-lesson unlock overrides, checked against the previous lesson's bests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonThresholds {
    pub advance_score: Option<f64>,
    pub min_accuracy: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseLesson {
    pub id: String,
    pub title: String,
    pub texts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default)]
    pub pass_criteria: PassCriteria,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<LessonThresholds>,
}

impl CourseLesson {
    /// A pre-lesson key drill is offered when the lesson introduces keys.
    pub fn has_pre_lesson_drill(&self) -> bool {
        !self.keys.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub lessons: Vec<CourseLesson>,
}

impl Course {
    pub fn bundled() -> Result<Self> {
        assets::load_json(assets::COURSE)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::json("course", e))
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn lesson(&self, id: &str) -> Option<&CourseLesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.lessons.iter().position(|l| l.id == id)
    }
}

pub fn next_lesson_id<'a>(course: &'a Course, current: &str) -> Option<&'a str> {
    let idx = course.index_of(current)?;
    course.lessons.get(idx + 1).map(|l| l.id.as_str())
}

#[derive(Clone, Debug, PartialEq)]
pub struct LockInfo<'a> {
    pub unlocked: bool,
    pub prev_lesson: Option<&'a CourseLesson>,
    pub req_wpm: f64,
    pub req_acc: f64,
    pub prev_progress: Option<&'a LessonProgress>,
}

/// Lesson `idx` opens once the previous lesson's best WPM and accuracy reach
/// the lesson's own thresholds, or `unlock` where it sets none. The first
/// lesson is always open.
pub fn compute_lesson_lock_info<'a>(
    lessons: &'a [CourseLesson],
    progress: &'a AppProgress,
    idx: usize,
    unlock: &UnlockRequirements,
) -> LockInfo<'a> {
    if idx == 0 {
        return LockInfo {
            unlocked: true,
            prev_lesson: None,
            req_wpm: unlock.wpm,
            req_acc: unlock.accuracy,
            prev_progress: None,
        };
    }

    let prev_lesson = lessons.get(idx - 1);
    let prev_progress = prev_lesson.and_then(|l| progress.lesson(&l.id));
    let thresholds = lessons.get(idx).and_then(|l| l.thresholds);
    let req_wpm = thresholds
        .and_then(|t| t.advance_score)
        .unwrap_or(unlock.wpm);
    let req_acc = thresholds
        .and_then(|t| t.min_accuracy)
        .unwrap_or(unlock.accuracy);

    let unlocked = prev_progress.is_some_and(|p| p.best_wpm >= req_wpm && p.best_acc >= req_acc);

    LockInfo {
        unlocked,
        prev_lesson,
        req_wpm,
        req_acc,
        prev_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(json: &str) -> PassCriteria {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn criteria_parse_with_auto() {
        assert_eq!(criteria(r#"{"type":"completed"}"#), PassCriteria::Completed);
        assert_eq!(
            criteria(r#"{"type":"performance","wpm":"auto","accuracy_percentage":85}"#),
            PassCriteria::Performance {
                min_wpm: None,
                min_accuracy: Some(85.0),
                min_score: None,
            }
        );
        assert_eq!(
            criteria(r#"{"type":"performance","wpm":12.5,"min_score":"AUTO"}"#),
            PassCriteria::Performance {
                min_wpm: Some(12.5),
                min_accuracy: None,
                min_score: None,
            }
        );
    }

    #[test]
    fn criteria_reject_other_strings() {
        let parsed: std::result::Result<PassCriteria, _> =
            serde_json::from_str(r#"{"type":"performance","wpm":"fast"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn resolve_fills_defaults() {
        let defaults = AdvanceThresholds::default();
        assert_eq!(
            PassCriteria::Completed.resolve(&defaults),
            AdvanceThresholds::permissive()
        );
        let resolved = PassCriteria::Performance {
            min_wpm: Some(10.0),
            min_accuracy: None,
            min_score: Some(70.0),
        }
        .resolve(&defaults);
        assert_eq!(resolved.advance_threshold, 70);
        assert_eq!(resolved.min_accuracy, 85.0);
        assert_eq!(resolved.min_wpm, Some(10.0));
        assert_eq!(resolved.max_missing, 3);
    }

    #[test]
    fn bundled_course_loads() {
        let course = Course::bundled().unwrap();
        assert!(course.len() >= 3);
        assert_eq!(course.index_of("home-row-signs"), Some(0));
        assert!(course.lessons.iter().all(|l| !l.texts.is_empty()));
        assert_eq!(
            next_lesson_id(&course, "home-row-signs"),
            Some("home-row-consonants")
        );
        let last = &course.lessons[course.len() - 1].id;
        assert_eq!(next_lesson_id(&course, last), None);
        assert_eq!(next_lesson_id(&course, "missing"), None);
    }

    #[test]
    fn malformed_course_is_an_error() {
        assert!(matches!(
            Course::from_json("{\"lessons\": 3}"),
            Err(Error::Json { .. })
        ));
    }

    fn progress_for(id: &str, wpm: f64, acc: f64) -> AppProgress {
        let mut progress = AppProgress::default();
        progress.lessons.insert(
            id.to_string(),
            LessonProgress {
                runs: 1,
                best_wpm: wpm,
                best_acc: acc,
                last_time: None,
            },
        );
        progress
    }

    #[test]
    fn first_lesson_is_always_unlocked() {
        let course = Course::bundled().unwrap();
        let progress = AppProgress::default();
        let info = compute_lesson_lock_info(
            &course.lessons,
            &progress,
            0,
            &UnlockRequirements::default(),
        );
        assert!(info.unlocked);
        assert!(info.prev_lesson.is_none());
    }

    #[test]
    fn later_lessons_need_previous_bests() {
        let course = Course::bundled().unwrap();
        let unlock = UnlockRequirements::default();
        let fresh = AppProgress::default();
        let locked = compute_lesson_lock_info(&course.lessons, &fresh, 1, &unlock);
        assert!(!locked.unlocked);
        assert_eq!(locked.prev_lesson.map(|l| l.id.as_str()), Some("home-row-signs"));
        assert_eq!((locked.req_wpm, locked.req_acc), (25.0, 90.0));

        let slow = progress_for("home-row-signs", 24.0, 99.0);
        assert!(!compute_lesson_lock_info(&course.lessons, &slow, 1, &unlock).unlocked);
        let ready = progress_for("home-row-signs", 25.0, 90.0);
        let info = compute_lesson_lock_info(&course.lessons, &ready, 1, &unlock);
        assert!(info.unlocked);
        assert_eq!(info.prev_progress.map(|p| p.runs), Some(1));
    }

    #[test]
    fn lesson_thresholds_override_unlock_defaults() {
        let course = Course::bundled().unwrap();
        let idx = course.index_of("first-words").unwrap();
        let prev = &course.lessons[idx - 1].id;
        let progress = progress_for(prev, 20.0, 90.0);
        let info =
            compute_lesson_lock_info(&course.lessons, &progress, idx, &UnlockRequirements::default());
        assert_eq!(info.req_wpm, 20.0);
        assert!(info.unlocked);
    }
}
