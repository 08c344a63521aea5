use thiserror::Error;

use crate::model::Course;

//
// ─── CONSTANTS ─────────────────────────────────────────────────────────────────
//

/// Fixed quiz size, regardless of how many lessons a course has.
pub const QUESTION_COUNT: usize = 10;
/// Every question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;
/// Minimum percentage required to pass and earn the certificate.
pub const PASS_THRESHOLD_PERCENT: u8 = 70;
/// Topic used when a course has no lessons to derive topics from.
pub const FALLBACK_TOPIC: &str = "Core Concepts";
/// Skill used when a course declares no skill tags.
pub const FALLBACK_SKILL: &str = "Concept";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("correct index must be < {OPTION_COUNT}, got {provided}")]
    CorrectIndexOutOfRange { provided: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question. Generated on demand and never
/// persisted; regenerating for the same course yields identical output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentQuestion {
    stem: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
}

impl AssessmentQuestion {
    /// Build a question, enforcing the four-options/one-correct invariant.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::CorrectIndexOutOfRange` if `correct_index`
    /// does not address one of the options.
    pub fn new(
        stem: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        if correct_index >= OPTION_COUNT {
            return Err(QuestionError::CorrectIndexOutOfRange {
                provided: correct_index,
            });
        }
        Ok(Self {
            stem: stem.into(),
            options,
            correct_index,
        })
    }

    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the accurate option, always in `0..OPTION_COUNT`.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }
}

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Outcome of grading a set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentScore {
    pub correct: usize,
    pub percent: u8,
    pub passed: bool,
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Derive the fixed-size quiz for a course from its lesson titles and skills.
///
/// Topics cycle through the lesson titles (falling back to
/// [`FALLBACK_TOPIC`] for a lesson-less course) and skills cycle with an
/// offset of `seed = courseId length`. The seed is a cheap per-course salt,
/// not a random source: the same course always produces byte-identical
/// questions, which is what makes assessments reproducible and cacheable.
#[must_use]
pub fn generate_questions(course: &Course) -> Vec<AssessmentQuestion> {
    let topics: Vec<&str> = if course.lessons().is_empty() {
        vec![FALLBACK_TOPIC]
    } else {
        course.lessons().iter().map(|lesson| lesson.title()).collect()
    };
    let skills: Vec<&str> = if course.skills().is_empty() {
        vec![FALLBACK_SKILL]
    } else {
        course.skills().iter().map(String::as_str).collect()
    };
    let seed = course.id().as_str().len();

    (0..QUESTION_COUNT)
        .map(|i| {
            let topic = topics[i % topics.len()];
            let skill = skills[(i + seed) % skills.len()];
            let correct_index = (i + seed) % OPTION_COUNT;

            let stem = format!(
                "In the context of {skill}, which statement about \"{topic}\" is most accurate?"
            );
            let mut options = [
                format!("A practical application of {topic} in {skill}."),
                format!("An unrelated fact not tied to {topic}."),
                format!("A definition that partially describes {topic}."),
                format!("A common misconception about {topic}."),
            ];
            // The accurate statement starts in slot 0; a right-rotation by the
            // target index is the cyclic shift that lands it at `correct_index`
            // while preserving the relative order of the distractors.
            options.rotate_right(correct_index);

            AssessmentQuestion {
                stem,
                options,
                correct_index,
            }
        })
        .collect()
}

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Grade submitted answers against the question set.
///
/// An unanswered slot (`None` or missing entirely) never counts as correct.
/// An empty question set grades as an automatic fail rather than a vacuous
/// pass.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn score_answers(
    answers: &[Option<usize>],
    questions: &[AssessmentQuestion],
) -> AssessmentScore {
    if questions.is_empty() {
        return AssessmentScore {
            correct: 0,
            percent: 0,
            passed: false,
        };
    }

    let correct = questions
        .iter()
        .enumerate()
        .filter(|(i, question)| {
            answers.get(*i).copied().flatten() == Some(question.correct_index)
        })
        .count();
    let percent = ((correct as f64 / questions.len() as f64) * 100.0).round() as u8;

    AssessmentScore {
        correct,
        percent,
        passed: percent >= PASS_THRESHOLD_PERCENT,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
