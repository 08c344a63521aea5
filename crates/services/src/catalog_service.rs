use std::collections::HashMap;

use learnhub_core::model::{Course, CourseId, Level};
use learnhub_core::recommend;

use crate::error::CatalogError;

/// Read-only view over the course catalog.
///
/// The catalog collaborator supplies the course list once at startup; this
/// service validates it and serves lookups, search, and recommendation
/// ordering. Catalog edits are an administrative concern outside this core.
#[derive(Debug)]
pub struct CatalogService {
    courses: Vec<Course>,
    by_id: HashMap<CourseId, usize>,
}

impl CatalogService {
    /// Build the catalog, rejecting duplicate course ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateCourseId` if two courses share an id.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(courses.len());
        for (index, course) in courses.iter().enumerate() {
            if by_id.insert(course.id().clone(), index).is_some() {
                return Err(CatalogError::DuplicateCourseId(course.id().clone()));
            }
        }
        Ok(Self { courses, by_id })
    }

    /// All courses in load order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.by_id.get(id).map(|&index| &self.courses[index])
    }

    /// The full catalog reordered by relevance to the learner's skills.
    #[must_use]
    pub fn recommended(&self, skills: &[String]) -> Vec<Course> {
        recommend::rank_by_relevance(&self.courses, skills)
    }

    /// Case-insensitive title/description search with an optional level
    /// filter. An empty term matches everything.
    #[must_use]
    pub fn search(&self, term: &str, level: Option<Level>) -> Vec<&Course> {
        let needle = term.to_lowercase();
        self.courses
            .iter()
            .filter(|course| {
                let matches_term = needle.is_empty()
                    || course.title().to_lowercase().contains(&needle)
                    || course.description().to_lowercase().contains(&needle);
                let matches_level = level.is_none_or(|wanted| course.level() == wanted);
                matches_term && matches_level
            })
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
