//! Deterministic key names for the durable key-value store.
//!
//! Every key is scoped to a single learner, so concurrent learners never
//! contend on the same record.

use learnhub_core::model::{CourseId, UserId};

/// Key for the watched-lesson map of one (learner, course) pair.
#[must_use]
pub fn progress(user: &UserId, course: &CourseId) -> String {
    format!("progress_{user}_{course}")
}

/// Key for the set of courses a learner has passed the assessment for.
#[must_use]
pub fn completed(user: &UserId) -> String {
    format!("completed_{user}")
}

/// Key for the learner's resume point within a course.
#[must_use]
pub fn last_lesson(user: &UserId, course: &CourseId) -> String {
    format!("last_lesson_{user}_{course}")
}
