use std::cmp::Ordering;

use crate::model::Course;

//
// ─── SCORING CONSTANTS ─────────────────────────────────────────────────────────
//

/// Courses above this enrollment count get the trending boost.
pub const TRENDING_STUDENTS_THRESHOLD: u32 = 10_000;
pub const TRENDING_BOOST: f64 = 0.5;
/// Ratings are scored relative to this baseline.
pub const RATING_BASELINE: f64 = 4.0;
pub const RATING_WEIGHT: f64 = 0.5;

//
// ─── RELEVANCE SCORING ─────────────────────────────────────────────────────────
//

/// Relevance of a course to a learner's declared skills.
///
/// `overlap + trending_boost + rating_boost`, where overlap counts
/// case-sensitive exact skill-tag matches. An empty skill list still yields a
/// valid popularity/rating score.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn relevance_score(course: &Course, skills: &[String]) -> f64 {
    let overlap = course
        .skills()
        .iter()
        .filter(|tag| skills.iter().any(|have| have == *tag))
        .count();
    let trending = if course.students() > TRENDING_STUDENTS_THRESHOLD {
        TRENDING_BOOST
    } else {
        0.0
    };
    let rating = (f64::from(course.rating()) - RATING_BASELINE) * RATING_WEIGHT;
    overlap as f64 + trending + rating
}

/// Reorder the full catalog by descending relevance.
///
/// Nothing is filtered out; courses with equal scores keep their catalog
/// order (the sort is stable).
#[must_use]
pub fn rank_by_relevance(courses: &[Course], skills: &[String]) -> Vec<Course> {
    let mut scored: Vec<(f64, &Course)> = courses
        .iter()
        .map(|course| (relevance_score(course, skills), course))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|(_, course)| course.clone()).collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
