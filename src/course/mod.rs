pub mod lesson;
pub mod progress;

pub use lesson::{
    Course, CourseLesson, LessonThresholds, LockInfo, PassCriteria, compute_lesson_lock_info,
    next_lesson_id,
};
pub use progress::{
    AppProgress, LessonProgress, ModeProgress, PracticeMode, UnlockRequirements,
    apply_result_to_progress,
};
