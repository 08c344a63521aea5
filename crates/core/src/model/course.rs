use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{CourseId, LessonId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course id cannot be empty")]
    EmptyId,

    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("course rating must be in 0..=5, got {provided}")]
    RatingOutOfRange { provided: f32 },

    #[error("lesson id cannot be empty")]
    EmptyLessonId,

    #[error("lesson title cannot be empty")]
    EmptyLessonTitle,

    #[error("duplicate lesson id within course: {0}")]
    DuplicateLessonId(LessonId),
}

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
    raw: String,
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown course level: {}", self.raw)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(Level::Beginner),
            "Intermediate" => Ok(Level::Intermediate),
            "Advanced" => Ok(Level::Advanced),
            other => Err(ParseLevelError { raw: other.to_string() }),
        }
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// A single video lesson. Owned by exactly one course; the position in the
/// course's lesson sequence drives unlock order and assessment topics.
#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    description: String,
    duration_secs: u32,
}

impl Lesson {
    /// Build a lesson, validating that id and title are non-empty.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyLessonId` or `CourseError::EmptyLessonTitle`.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        description: impl Into<String>,
        duration_secs: u32,
    ) -> Result<Self, CourseError> {
        if id.as_str().trim().is_empty() {
            return Err(CourseError::EmptyLessonId);
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::EmptyLessonTitle);
        }
        Ok(Self {
            id,
            title,
            description: description.into(),
            duration_secs,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// Unvalidated course fields as supplied by the catalog collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub level: Level,
    pub price: f32,
    pub duration: String,
    pub students: u32,
    pub rating: f32,
    pub skills: Vec<String>,
    pub instructor: String,
    pub thumbnail: String,
    pub lessons: Vec<Lesson>,
}

impl CourseDraft {
    /// Validate the draft into an immutable `Course`.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the id or title is empty, the rating falls
    /// outside `0..=5`, or two lessons share an id.
    pub fn validate(self) -> Result<Course, CourseError> {
        if self.id.as_str().trim().is_empty() {
            return Err(CourseError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(CourseError::RatingOutOfRange { provided: self.rating });
        }

        let mut seen: HashSet<&LessonId> = HashSet::with_capacity(self.lessons.len());
        for lesson in &self.lessons {
            if !seen.insert(lesson.id()) {
                return Err(CourseError::DuplicateLessonId(lesson.id().clone()));
            }
        }

        Ok(Course {
            id: self.id,
            title: self.title,
            description: self.description,
            level: self.level,
            price: self.price,
            duration: self.duration,
            students: self.students,
            rating: self.rating,
            skills: self.skills,
            instructor: self.instructor,
            thumbnail: self.thumbnail,
            lessons: self.lessons,
        })
    }
}

/// A validated catalog entry. Immutable after load; catalog edits are an
/// administrative concern outside this core.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    level: Level,
    price: f32,
    duration: String,
    students: u32,
    rating: f32,
    skills: Vec<String>,
    instructor: String,
    thumbnail: String,
    lessons: Vec<Lesson>,
}

impl Course {
    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn price(&self) -> f32 {
        self.price
    }

    /// Human-readable total duration, e.g. `12h 10m`.
    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn students(&self) -> u32 {
        self.students
    }

    /// Average rating in `0..=5`.
    #[must_use]
    pub fn rating(&self) -> f32 {
        self.rating
    }

    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    #[must_use]
    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    #[must_use]
    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    /// Lessons in consumption order.
    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id() == id)
    }

    #[must_use]
    pub fn has_lesson(&self, id: &LessonId) -> bool {
        self.lesson(id).is_some()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
