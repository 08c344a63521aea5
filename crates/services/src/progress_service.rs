use std::sync::Arc;

use learnhub_core::model::{Course, CourseId, LessonId, UserId};
use storage::repository::Storage;
use tracing::{debug, info};

use crate::catalog_service::CatalogService;
use crate::error::ProgressError;

/// Records lesson completion and derives per-course progress.
///
/// All state lives in the injected key-value [`Storage`]; the catalog is
/// consulted for lesson counts and validation. Anonymous learners are
/// tolerated everywhere: writes become no-ops and reads zero values, which
/// mirrors unauthenticated browsing.
#[derive(Clone)]
pub struct ProgressService {
    catalog: Arc<CatalogService>,
    storage: Storage,
}

impl ProgressService {
    #[must_use]
    pub fn new(catalog: Arc<CatalogService>, storage: Storage) -> Self {
        Self { catalog, storage }
    }

    fn course(&self, course_id: &CourseId) -> Result<&Course, ProgressError> {
        self.catalog
            .get(course_id)
            .ok_or_else(|| ProgressError::CourseNotFound(course_id.clone()))
    }

    /// Flag a lesson as watched. Idempotent: an already-set flag is left
    /// untouched and nothing is rewritten.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` for an unknown course or lesson, or on
    /// storage failure.
    pub async fn mark_lesson_complete(
        &self,
        user: &UserId,
        course_id: &CourseId,
        lesson_id: &LessonId,
    ) -> Result<(), ProgressError> {
        if user.is_anonymous() {
            debug!(course = %course_id, "progress update skipped for anonymous learner");
            return Ok(());
        }
        let course = self.course(course_id)?;
        if !course.has_lesson(lesson_id) {
            return Err(ProgressError::LessonNotFound {
                course: course_id.clone(),
                lesson: lesson_id.clone(),
            });
        }

        let mut record = self.storage.load_progress(user, course_id).await?;
        if record.mark_watched(lesson_id.clone()) {
            self.storage.save_progress(user, course_id, &record).await?;
            debug!(user = %user, course = %course_id, lesson = %lesson_id, "lesson watched");
        }
        Ok(())
    }

    /// Completion percentage in `0..=100`. Zero for anonymous learners and
    /// for courses without lessons.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` for an unknown course or on storage failure.
    pub async fn progress_percent(
        &self,
        user: &UserId,
        course_id: &CourseId,
    ) -> Result<u8, ProgressError> {
        // Anonymity wins over validation, matching the write path: an
        // anonymous read is always zero, even for a course we do not know.
        if user.is_anonymous() {
            return Ok(0);
        }
        let course = self.course(course_id)?;
        let record = self.storage.load_progress(user, course_id).await?;
        Ok(record.percent_for(course))
    }

    /// Whether the lesson at `index` is reachable yet. Lesson 0 is always
    /// unlocked; any later lesson requires its predecessor to be watched.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` for an unknown course or on storage failure.
    pub async fn is_lesson_unlocked(
        &self,
        user: &UserId,
        course_id: &CourseId,
        index: usize,
    ) -> Result<bool, ProgressError> {
        let course = self.course(course_id)?;
        let record = if user.is_anonymous() {
            learnhub_core::model::ProgressRecord::default()
        } else {
            self.storage.load_progress(user, course_id).await?
        };
        Ok(record.is_lesson_unlocked(course, index))
    }

    /// Record a passed course in the learner's completion set. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` for an unknown course or on storage failure.
    pub async fn complete_course(
        &self,
        user: &UserId,
        course_id: &CourseId,
    ) -> Result<(), ProgressError> {
        if user.is_anonymous() {
            debug!(course = %course_id, "completion skipped for anonymous learner");
            return Ok(());
        }
        self.course(course_id)?;

        let mut record = self.storage.load_completions(user).await?;
        if record.add(course_id.clone()) {
            self.storage.save_completions(user, &record).await?;
            info!(user = %user, course = %course_id, "course completed");
        }
        Ok(())
    }

    /// Whether the learner has passed the course assessment.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` on storage failure.
    pub async fn is_course_completed(
        &self,
        user: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, ProgressError> {
        if user.is_anonymous() {
            return Ok(false);
        }
        let record = self.storage.load_completions(user).await?;
        Ok(record.contains(course_id))
    }

    /// Remember where the learner left off in a course.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` for an unknown course or lesson, or on
    /// storage failure.
    pub async fn set_last_lesson(
        &self,
        user: &UserId,
        course_id: &CourseId,
        lesson_id: &LessonId,
    ) -> Result<(), ProgressError> {
        if user.is_anonymous() {
            return Ok(());
        }
        let course = self.course(course_id)?;
        if !course.has_lesson(lesson_id) {
            return Err(ProgressError::LessonNotFound {
                course: course_id.clone(),
                lesson: lesson_id.clone(),
            });
        }
        self.storage.save_last_lesson(user, course_id, lesson_id).await?;
        Ok(())
    }

    /// The learner's resume point in a course, if one was recorded.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` for an unknown course or on storage failure.
    pub async fn last_lesson(
        &self,
        user: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<LessonId>, ProgressError> {
        if user.is_anonymous() {
            return Ok(None);
        }
        self.course(course_id)?;
        Ok(self.storage.load_last_lesson(user, course_id).await?)
    }

    /// Courses the learner has started but not finished watching
    /// (`0 < percent < 100`), in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` on storage failure.
    pub async fn in_progress_courses(&self, user: &UserId) -> Result<Vec<Course>, ProgressError> {
        if user.is_anonymous() {
            return Ok(Vec::new());
        }
        let mut started = Vec::new();
        for course in self.catalog.courses() {
            let record = self.storage.load_progress(user, course.id()).await?;
            let percent = record.percent_for(course);
            if percent > 0 && percent < 100 {
                started.push(course.clone());
            }
        }
        Ok(started)
    }

    /// Courses the learner has passed the assessment for, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` on storage failure.
    pub async fn completed_courses(&self, user: &UserId) -> Result<Vec<Course>, ProgressError> {
        if user.is_anonymous() {
            return Ok(Vec::new());
        }
        let record = self.storage.load_completions(user).await?;
        Ok(self
            .catalog
            .courses()
            .iter()
            .filter(|course| record.contains(course.id()))
            .cloned()
            .collect())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
