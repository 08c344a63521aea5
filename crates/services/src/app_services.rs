use std::sync::Arc;

use learnhub_core::model::Course;
use learnhub_core::Clock;
use storage::repository::Storage;
use tracing::info;

use crate::assessment::AssessmentService;
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Fully wired service bundle.
///
/// Owns one catalog shared across the progress and assessment services, all
/// backed by the same storage handle.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<CatalogService>,
    pub progress: ProgressService,
    pub assessments: AssessmentService,
}

impl AppServices {
    fn wire(courses: Vec<Course>, storage: Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(CatalogService::new(courses)?);
        let progress = ProgressService::new(Arc::clone(&catalog), storage);
        let assessments =
            AssessmentService::with_clock(Arc::clone(&catalog), progress.clone(), clock);
        Ok(Self {
            catalog,
            progress,
            assessments,
        })
    }

    /// Services over volatile in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the catalog is invalid.
    pub fn in_memory(courses: Vec<Course>) -> Result<Self, AppServicesError> {
        Self::wire(courses, Storage::in_memory(), Clock::default_clock())
    }

    /// Like [`AppServices::in_memory`] but with an explicit clock, for
    /// deterministic deadline behavior in tests.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the catalog is invalid.
    pub fn in_memory_with_clock(
        courses: Vec<Course>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        Self::wire(courses, Storage::in_memory(), clock)
    }

    /// Services over a SQLite database at `url`, running migrations first.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or
    /// migrated, or if the catalog is invalid.
    pub async fn sqlite(courses: Vec<Course>, url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(url).await?;
        info!(%url, "services wired over sqlite storage");
        Self::wire(courses, storage, Clock::default_clock())
    }
}
