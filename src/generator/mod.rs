pub mod common_words;
pub mod letters;

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::course::lesson::{Course, compute_lesson_lock_info};
use crate::course::progress::{AppProgress, PracticeMode, UnlockRequirements};

pub use common_words::{build_common_paragraph, bundled_common_words};
pub use letters::{build_letter_string, build_pre_lesson_drill, bundled_letters};

const DEFAULT_LETTERS_LENGTH: usize = 50;
const DEFAULT_COMMON_LENGTH: usize = 30;
const DEFAULT_CUSTOM_LENGTH: usize = 50;
const MIN_CUSTOM_LENGTH: usize = 10;
const MAX_LETTERS_LENGTH: usize = 1000;
const MAX_COMMON_LENGTH: usize = 500;

/// A preset length is used as given; a custom one is clamped to the mode's range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextLength {
    Preset(usize),
    Custom(usize),
}

impl TextLength {
    fn resolve(self, preset_default: usize, max: usize) -> usize {
        match self {
            TextLength::Preset(0) => preset_default,
            TextLength::Preset(n) => n,
            TextLength::Custom(0) => DEFAULT_CUSTOM_LENGTH.clamp(MIN_CUSTOM_LENGTH, max),
            TextLength::Custom(n) => n.clamp(MIN_CUSTOM_LENGTH, max),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GenerateError {
    #[error("Select at least one letter to generate text.")]
    NoLetters,
    #[error("Enter a Malayalam paragraph first.")]
    EmptyParagraph,
    #[error("Common words list is empty.")]
    NoCommonWords,
    #[error("The course has no lessons.")]
    EmptyCourse,
    #[error("Lesson \"{0}\" has no practice texts.")]
    EmptyLesson(String),
    #[error(
        "Lesson locked. Complete \"{prev_title}\" with at least {req_wpm} WPM and {req_acc}% accuracy to unlock this."
    )]
    Locked {
        prev_title: String,
        req_wpm: f64,
        req_acc: f64,
    },
    #[error("Complete pre-lesson drill or skip to start the lesson.")]
    PreLessonDrill { lesson_id: String },
}

impl GenerateError {
    pub fn needs_familiarize(&self) -> bool {
        matches!(self, GenerateError::PreLessonDrill { .. })
    }
}

/// Everything text selection reads: the mode's settings, content lists and
/// the learner's progress.
#[derive(Clone, Copy, Debug)]
pub struct TextRequest<'a> {
    pub mode: PracticeMode,
    pub selected_letters: &'a [String],
    pub letters_length: TextLength,
    pub paragraph: &'a str,
    pub common_words: &'a [String],
    pub common_length: TextLength,
    pub course: &'a Course,
    pub lesson_id: Option<&'a str>,
    pub progress: &'a AppProgress,
    pub pre_lesson_done: &'a HashSet<String>,
    pub unlock: UnlockRequirements,
}

pub fn generate_test_text(
    request: &TextRequest<'_>,
    rng: &mut SmallRng,
) -> Result<String, GenerateError> {
    match request.mode {
        PracticeMode::Letters => {
            let len = request
                .letters_length
                .resolve(DEFAULT_LETTERS_LENGTH, MAX_LETTERS_LENGTH);
            let text = build_letter_string(request.selected_letters, len, rng);
            if text.is_empty() {
                return Err(GenerateError::NoLetters);
            }
            Ok(text)
        }
        PracticeMode::Paragraph => {
            let text = request.paragraph.trim();
            if text.is_empty() {
                return Err(GenerateError::EmptyParagraph);
            }
            Ok(text.to_string())
        }
        PracticeMode::Common => {
            let len = request
                .common_length
                .resolve(DEFAULT_COMMON_LENGTH, MAX_COMMON_LENGTH);
            let text = build_common_paragraph(request.common_words, len, rng);
            if text.is_empty() {
                return Err(GenerateError::NoCommonWords);
            }
            Ok(text)
        }
        PracticeMode::Course => course_text(request, rng),
    }
}

fn course_text(request: &TextRequest<'_>, rng: &mut SmallRng) -> Result<String, GenerateError> {
    let course = request.course;
    let idx = request
        .lesson_id
        .and_then(|id| course.index_of(id))
        .unwrap_or(0);
    let lesson = course.lessons.get(idx).ok_or(GenerateError::EmptyCourse)?;

    let lock = compute_lesson_lock_info(&course.lessons, request.progress, idx, &request.unlock);
    if !lock.unlocked {
        return Err(GenerateError::Locked {
            prev_title: lock
                .prev_lesson
                .map(|l| l.title.clone())
                .unwrap_or_default(),
            req_wpm: lock.req_wpm,
            req_acc: lock.req_acc,
        });
    }

    if lesson.has_pre_lesson_drill() && !request.pre_lesson_done.contains(&lesson.id) {
        return Err(GenerateError::PreLessonDrill {
            lesson_id: lesson.id.clone(),
        });
    }

    if lesson.texts.is_empty() {
        return Err(GenerateError::EmptyLesson(lesson.id.clone()));
    }
    Ok(lesson.texts[rng.gen_range(0..lesson.texts.len())].clone())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::course::progress::LessonProgress;

    struct Fixture {
        letters: Vec<String>,
        words: Vec<String>,
        course: Course,
        progress: AppProgress,
        done: HashSet<String>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                letters: vec!["ക".to_string(), "ത".to_string()],
                words: vec!["ഒരു".to_string(), "അവൻ".to_string()],
                course: Course::bundled().unwrap(),
                progress: AppProgress::default(),
                done: HashSet::new(),
            }
        }

        fn request(&self, mode: PracticeMode) -> TextRequest<'_> {
            TextRequest {
                mode,
                selected_letters: &self.letters,
                letters_length: TextLength::Preset(0),
                paragraph: "",
                common_words: &self.words,
                common_length: TextLength::Preset(0),
                course: &self.course,
                lesson_id: None,
                progress: &self.progress,
                pre_lesson_done: &self.done,
                unlock: UnlockRequirements::default(),
            }
        }
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn letter_count(text: &str) -> usize {
        text.chars().filter(|c| *c != ' ').count()
    }

    #[test]
    fn letters_lengths() {
        let f = Fixture::new();
        let mut req = f.request(PracticeMode::Letters);
        assert_eq!(letter_count(&generate_test_text(&req, &mut rng()).unwrap()), 50);
        req.letters_length = TextLength::Preset(12);
        assert_eq!(letter_count(&generate_test_text(&req, &mut rng()).unwrap()), 12);
        req.letters_length = TextLength::Custom(3);
        assert_eq!(letter_count(&generate_test_text(&req, &mut rng()).unwrap()), 10);
        req.letters_length = TextLength::Custom(5000);
        assert_eq!(letter_count(&generate_test_text(&req, &mut rng()).unwrap()), 1000);
    }

    #[test]
    fn letters_need_a_selection() {
        let f = Fixture::new();
        let mut req = f.request(PracticeMode::Letters);
        req.selected_letters = &[];
        assert_eq!(generate_test_text(&req, &mut rng()), Err(GenerateError::NoLetters));
    }

    #[test]
    fn paragraph_is_trimmed() {
        let f = Fixture::new();
        let mut req = f.request(PracticeMode::Paragraph);
        req.paragraph = "  അവൻ വന്നു \n";
        assert_eq!(generate_test_text(&req, &mut rng()).unwrap(), "അവൻ വന്നു");
        req.paragraph = "   ";
        let err = generate_test_text(&req, &mut rng()).unwrap_err();
        assert_eq!(err, GenerateError::EmptyParagraph);
        assert_eq!(err.to_string(), "Enter a Malayalam paragraph first.");
    }

    #[test]
    fn common_words_custom_length_is_clamped() {
        let f = Fixture::new();
        let mut req = f.request(PracticeMode::Common);
        req.common_length = TextLength::Custom(900);
        let text = generate_test_text(&req, &mut rng()).unwrap();
        let words = text.split(' ').filter(|w| *w != ".").count();
        assert_eq!(words, 500);
    }

    #[test]
    fn course_falls_back_to_first_lesson() {
        let mut f = Fixture::new();
        f.done.insert("home-row-signs".to_string());
        let mut req = f.request(PracticeMode::Course);
        req.lesson_id = Some("no-such-lesson");
        let text = generate_test_text(&req, &mut rng()).unwrap();
        assert!(f.course.lessons[0].texts.contains(&text));
    }

    #[test]
    fn course_lesson_with_keys_needs_drill() {
        let f = Fixture::new();
        let req = f.request(PracticeMode::Course);
        let err = generate_test_text(&req, &mut rng()).unwrap_err();
        assert!(err.needs_familiarize());
        assert_eq!(
            err,
            GenerateError::PreLessonDrill {
                lesson_id: "home-row-signs".to_string()
            }
        );
    }

    #[test]
    fn locked_lesson_reports_requirements() {
        let f = Fixture::new();
        let mut req = f.request(PracticeMode::Course);
        req.lesson_id = Some("home-row-consonants");
        let err = generate_test_text(&req, &mut rng()).unwrap_err();
        assert!(!err.needs_familiarize());
        assert_eq!(
            err.to_string(),
            "Lesson locked. Complete \"Home row vowel signs\" with at least 25 WPM and 90% accuracy to unlock this."
        );
    }

    #[test]
    fn unlocked_lesson_yields_one_of_its_texts() {
        let mut f = Fixture::new();
        f.progress.lessons.insert(
            "home-row-consonants".to_string(),
            LessonProgress {
                runs: 3,
                best_wpm: 30.0,
                best_acc: 95.0,
                last_time: None,
            },
        );
        let mut req = f.request(PracticeMode::Course);
        req.lesson_id = Some("first-words");
        let text = generate_test_text(&req, &mut rng()).unwrap();
        let lesson = f.course.lesson("first-words").unwrap();
        assert!(lesson.texts.contains(&text));
    }

    #[test]
    fn empty_course_is_an_error() {
        let mut f = Fixture::new();
        f.course = Course::default();
        let req = f.request(PracticeMode::Course);
        assert_eq!(generate_test_text(&req, &mut rng()), Err(GenerateError::EmptyCourse));
    }
}
