//! Shared error types for the services crate.

use thiserror::Error;

use learnhub_core::model::{CourseError, CourseId, LessonId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while loading a catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate course id in catalog: {0}")]
    DuplicateCourseId(CourseId),

    #[error(transparent)]
    Course(#[from] CourseError),
}

/// Errors emitted by `ProgressService`.
///
/// Anonymous learners are not an error: writes degrade to no-ops and reads
/// to zero values instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("course not found: {0}")]
    CourseNotFound(CourseId),

    #[error("lesson {lesson} not found in course {course}")]
    LessonNotFound { course: CourseId, lesson: LessonId },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the assessment subsystem.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("course not found: {0}")]
    CourseNotFound(CourseId),

    #[error("attempt already graded")]
    AlreadyGraded,

    #[error("question index {index} out of range for {total} questions")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error("option index {index} out of range")]
    OptionOutOfRange { index: usize },

    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
