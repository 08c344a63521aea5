use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::course::Course;
use crate::model::ids::{CourseId, LessonId};

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// Per-(learner, course) map of watched lessons.
///
/// Serializes to the flat `{"lesson-id": true, ...}` JSON object the storage
/// layer persists under `progress_{userId}_{courseId}`. A `BTreeMap` keeps the
/// encoding stable across saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    watched: BTreeMap<LessonId, bool>,
}

impl ProgressRecord {
    /// Flag a lesson as watched. Returns `true` if the flag was newly set,
    /// `false` if it was already present (no state change).
    pub fn mark_watched(&mut self, lesson_id: LessonId) -> bool {
        match self.watched.get(&lesson_id) {
            Some(true) => false,
            _ => {
                self.watched.insert(lesson_id, true);
                true
            }
        }
    }

    #[must_use]
    pub fn is_watched(&self, lesson_id: &LessonId) -> bool {
        self.watched.get(lesson_id).copied().unwrap_or(false)
    }

    /// Count of the course's own lessons flagged watched. Stray entries that
    /// do not belong to the course are ignored, so the count never exceeds the
    /// lesson total.
    #[must_use]
    pub fn watched_count(&self, course: &Course) -> usize {
        course
            .lessons()
            .iter()
            .filter(|lesson| self.is_watched(lesson.id()))
            .count()
    }

    /// Completion percentage for the course, rounded to the nearest integer.
    ///
    /// Returns `0` for a course with no lessons.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent_for(&self, course: &Course) -> u8 {
        let total = course.lessons().len();
        if total == 0 {
            return 0;
        }
        let watched = self.watched_count(course);
        ((watched as f64 / total as f64) * 100.0).round() as u8
    }

    /// Sequential-unlock rule: lesson 0 is always unlocked; lesson `i > 0`
    /// unlocks only once lesson `i - 1` is watched. An out-of-range index is
    /// never unlocked.
    #[must_use]
    pub fn is_lesson_unlocked(&self, course: &Course, index: usize) -> bool {
        if index >= course.lessons().len() {
            return false;
        }
        if index == 0 {
            return true;
        }
        self.is_watched(course.lessons()[index - 1].id())
    }
}

//
// ─── COMPLETION RECORD ─────────────────────────────────────────────────────────
//

/// Per-learner set of courses with a passed assessment.
///
/// Serializes to the JSON array persisted under `completed_{userId}`.
/// Append-only: entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionRecord {
    courses: BTreeSet<CourseId>,
}

impl CompletionRecord {
    /// Record a passed course. Returns `true` if the entry is new.
    pub fn add(&mut self, course_id: CourseId) -> bool {
        self.courses.insert(course_id)
    }

    #[must_use]
    pub fn contains(&self, course_id: &CourseId) -> bool {
        self.courses.contains(course_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
