mod course;
mod ids;
mod progress;

pub use course::{Course, CourseDraft, CourseError, Lesson, Level, ParseLevelError};
pub use ids::{CourseId, LessonId, UserId};
pub use progress::{CompletionRecord, ProgressRecord};
