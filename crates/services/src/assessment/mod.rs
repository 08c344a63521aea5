//! Timed assessment attempts and grading.

mod attempt;
mod service;

pub use attempt::{AssessmentAttempt, ASSESSMENT_TIME_LIMIT_SECS};
pub use service::AssessmentService;

pub use crate::error::AssessmentError;
