use std::sync::Arc;

use learnhub_core::assessment::{self, AssessmentQuestion, AssessmentScore};
use learnhub_core::model::{CourseId, UserId};
use learnhub_core::Clock;
use tracing::{debug, info};

use crate::assessment::attempt::AssessmentAttempt;
use crate::catalog_service::CatalogService;
use crate::error::AssessmentError;
use crate::progress_service::ProgressService;

/// Runs course assessments: question generation, timed attempts, grading,
/// and the completion side effect for a passing grade.
#[derive(Clone)]
pub struct AssessmentService {
    catalog: Arc<CatalogService>,
    progress: ProgressService,
    clock: Clock,
}

impl AssessmentService {
    #[must_use]
    pub fn new(catalog: Arc<CatalogService>, progress: ProgressService) -> Self {
        Self::with_clock(catalog, progress, Clock::default_clock())
    }

    #[must_use]
    pub fn with_clock(
        catalog: Arc<CatalogService>,
        progress: ProgressService,
        clock: Clock,
    ) -> Self {
        Self {
            catalog,
            progress,
            clock,
        }
    }

    /// The deterministic question set for a course.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::CourseNotFound` for an unknown course.
    pub fn questions(&self, course_id: &CourseId) -> Result<Vec<AssessmentQuestion>, AssessmentError> {
        let course = self
            .catalog
            .get(course_id)
            .ok_or_else(|| AssessmentError::CourseNotFound(course_id.clone()))?;
        Ok(assessment::generate_questions(course))
    }

    /// Open a timed attempt. The deadline is fixed from this service's clock
    /// at the moment of the call.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::CourseNotFound` for an unknown course.
    pub fn start_attempt(&self, course_id: &CourseId) -> Result<AssessmentAttempt, AssessmentError> {
        let questions = self.questions(course_id)?;
        let started_at = self.clock.now();
        debug!(course = %course_id, %started_at, "assessment attempt started");
        Ok(AssessmentAttempt::new(course_id.clone(), questions, started_at))
    }

    /// Grade an attempt and apply the completion side effect on a pass.
    ///
    /// An attempt past its deadline is graded from whatever answers were
    /// recorded before the learner submitted. A failing grade leaves the
    /// completion set untouched; the learner keeps lesson progress and can
    /// start a fresh attempt.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::AlreadyGraded` if the attempt was graded
    /// before this call, or a `ProgressError` if recording the completion
    /// fails.
    pub async fn finish_attempt(
        &self,
        user: &UserId,
        attempt: &mut AssessmentAttempt,
    ) -> Result<AssessmentScore, AssessmentError> {
        if attempt.is_graded() {
            return Err(AssessmentError::AlreadyGraded);
        }
        let now = self.clock.now();
        let score = if let Some(score) = attempt.check_deadline(now) {
            let score = *score;
            info!(course = %attempt.course_id(), percent = score.percent, "attempt expired, graded from recorded answers");
            score
        } else {
            *attempt.submit()?
        };
        self.apply_outcome(user, attempt.course_id(), score).await?;
        Ok(score)
    }

    /// One-shot grading: score a full answer sheet against the course's
    /// question set, without the timed-attempt machinery.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::CourseNotFound` for an unknown course, or a
    /// `ProgressError` if recording the completion fails.
    pub async fn submit_assessment(
        &self,
        user: &UserId,
        course_id: &CourseId,
        answers: &[Option<usize>],
    ) -> Result<AssessmentScore, AssessmentError> {
        let questions = self.questions(course_id)?;
        let score = assessment::score_answers(answers, &questions);
        self.apply_outcome(user, course_id, score).await?;
        Ok(score)
    }

    async fn apply_outcome(
        &self,
        user: &UserId,
        course_id: &CourseId,
        score: AssessmentScore,
    ) -> Result<(), AssessmentError> {
        if score.passed {
            self.progress.complete_course(user, course_id).await?;
        } else {
            debug!(course = %course_id, percent = score.percent, "assessment failed, completion unchanged");
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_catalog;
    use chrono::Duration;
    use learnhub_core::time::fixed_clock;
    use storage::repository::Storage;

    fn services() -> (AssessmentService, ProgressService) {
        let catalog = Arc::new(CatalogService::new(sample_catalog().unwrap()).unwrap());
        let progress = ProgressService::new(Arc::clone(&catalog), Storage::in_memory());
        let assessments =
            AssessmentService::with_clock(catalog, progress.clone(), fixed_clock());
        (assessments, progress)
    }

    fn react() -> CourseId {
        CourseId::new("react-complete-guide")
    }

    #[tokio::test]
    async fn unknown_course_cannot_start() {
        let (svc, _) = services();
        assert!(matches!(
            svc.start_attempt(&CourseId::new("missing")),
            Err(AssessmentError::CourseNotFound(_))
        ));
    }

    #[tokio::test]
    async fn passing_attempt_completes_the_course() {
        let (svc, progress) = services();
        let user = UserId::new("u-1");

        let mut attempt = svc.start_attempt(&react()).unwrap();
        let keys: Vec<usize> = attempt.questions().iter().map(|q| q.correct_index()).collect();
        for (i, key) in keys.into_iter().enumerate() {
            attempt.record_answer(i, key).unwrap();
        }

        let score = svc.finish_attempt(&user, &mut attempt).await.unwrap();
        assert_eq!(score.percent, 100);
        assert!(score.passed);
        assert!(progress.is_course_completed(&user, &react()).await.unwrap());
    }

    #[tokio::test]
    async fn failing_attempt_leaves_completion_unset() {
        let (svc, progress) = services();
        let user = UserId::new("u-1");

        let mut attempt = svc.start_attempt(&react()).unwrap();
        // Answer six of ten correctly: 60% is below the pass threshold.
        let keys: Vec<usize> = attempt.questions().iter().map(|q| q.correct_index()).collect();
        for (i, key) in keys.iter().enumerate().take(6) {
            attempt.record_answer(i, *key).unwrap();
        }
        for (i, key) in keys.iter().enumerate().skip(6) {
            attempt.record_answer(i, (key + 1) % 4).unwrap();
        }

        let score = svc.finish_attempt(&user, &mut attempt).await.unwrap();
        assert_eq!(score.percent, 60);
        assert!(!score.passed);
        assert!(!progress.is_course_completed(&user, &react()).await.unwrap());
    }

    #[tokio::test]
    async fn expired_attempt_grades_recorded_answers() {
        let catalog = Arc::new(CatalogService::new(sample_catalog().unwrap()).unwrap());
        let progress = ProgressService::new(Arc::clone(&catalog), Storage::in_memory());
        let mut clock = fixed_clock();
        let svc = AssessmentService::with_clock(
            Arc::clone(&catalog),
            progress.clone(),
            clock,
        );
        let user = UserId::new("u-1");

        let mut attempt = svc.start_attempt(&react()).unwrap();
        attempt.record_answer(0, attempt.questions()[0].correct_index()).unwrap();

        // A service whose clock sits past the deadline grades the partial sheet.
        clock.advance(Duration::seconds(
            crate::assessment::ASSESSMENT_TIME_LIMIT_SECS + 1,
        ));
        let late = AssessmentService::with_clock(catalog, progress.clone(), clock);
        let score = late.finish_attempt(&user, &mut attempt).await.unwrap();
        assert_eq!(score.correct, 1);
        assert!(!score.passed);
        assert!(!progress.is_course_completed(&user, &react()).await.unwrap());
    }

    #[tokio::test]
    async fn finished_attempt_cannot_be_finished_again() {
        let (svc, _) = services();
        let user = UserId::new("u-1");
        let mut attempt = svc.start_attempt(&react()).unwrap();
        svc.finish_attempt(&user, &mut attempt).await.unwrap();
        assert!(matches!(
            svc.finish_attempt(&user, &mut attempt).await,
            Err(AssessmentError::AlreadyGraded)
        ));
    }

    #[tokio::test]
    async fn one_shot_submission_matches_the_question_set() {
        let (svc, progress) = services();
        let user = UserId::new("u-1");

        let questions = svc.questions(&react()).unwrap();
        let answers: Vec<Option<usize>> =
            questions.iter().map(|q| Some(q.correct_index())).collect();
        let score = svc.submit_assessment(&user, &react(), &answers).await.unwrap();
        assert!(score.passed);
        assert!(progress.is_course_completed(&user, &react()).await.unwrap());
    }
}
