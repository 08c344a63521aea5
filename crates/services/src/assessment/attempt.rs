use chrono::{DateTime, Duration, Utc};

use learnhub_core::assessment::{self, AssessmentQuestion, AssessmentScore};
use learnhub_core::model::CourseId;

use crate::error::AssessmentError;

/// Wall-clock limit for an attempt (30 minutes).
pub const ASSESSMENT_TIME_LIMIT_SECS: i64 = 1800;

/// One in-flight quiz attempt.
///
/// The attempt owns its question set and the learner's answers; the deadline
/// is fixed at start and never extended. Once graded (by submission or by
/// deadline expiry) the attempt is frozen and further answers are rejected.
#[derive(Debug, Clone)]
pub struct AssessmentAttempt {
    course_id: CourseId,
    questions: Vec<AssessmentQuestion>,
    answers: Vec<Option<usize>>,
    started_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
    score: Option<AssessmentScore>,
}

impl AssessmentAttempt {
    pub(crate) fn new(
        course_id: CourseId,
        questions: Vec<AssessmentQuestion>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            course_id,
            questions,
            answers,
            started_at,
            deadline: started_at + Duration::seconds(ASSESSMENT_TIME_LIMIT_SECS),
            score: None,
        }
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn questions(&self) -> &[AssessmentQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// The grade, once the attempt has been submitted or timed out.
    #[must_use]
    pub fn score(&self) -> Option<&AssessmentScore> {
        self.score.as_ref()
    }

    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.score.is_some()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Seconds left on the clock at `now`, never negative.
    #[must_use]
    pub fn remaining_time(&self, now: DateTime<Utc>) -> i64 {
        (self.deadline - now).num_seconds().max(0)
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }

    /// Record (or change) the answer for one question.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError` if the attempt is already graded or either
    /// index is out of range.
    pub fn record_answer(&mut self, question: usize, option: usize) -> Result<(), AssessmentError> {
        if self.is_graded() {
            return Err(AssessmentError::AlreadyGraded);
        }
        if question >= self.questions.len() {
            return Err(AssessmentError::QuestionOutOfRange {
                index: question,
                total: self.questions.len(),
            });
        }
        if option >= assessment::OPTION_COUNT {
            return Err(AssessmentError::OptionOutOfRange { index: option });
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    /// Grade the attempt if its deadline has passed.
    ///
    /// The first call after expiry grades whatever answers were recorded;
    /// later calls return `None` so the expiry is observed exactly once.
    pub fn check_deadline(&mut self, now: DateTime<Utc>) -> Option<&AssessmentScore> {
        if self.is_graded() || !self.is_expired(now) {
            return None;
        }
        self.score = Some(assessment::score_answers(&self.answers, &self.questions));
        self.score.as_ref()
    }

    /// Grade the attempt from the recorded answers.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::AlreadyGraded` if a grade already exists.
    pub fn submit(&mut self) -> Result<&AssessmentScore, AssessmentError> {
        if self.is_graded() {
            return Err(AssessmentError::AlreadyGraded);
        }
        let score = assessment::score_answers(&self.answers, &self.questions);
        Ok(self.score.insert(score))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
