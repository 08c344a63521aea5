#![forbid(unsafe_code)]

pub mod app_services;
pub mod assessment;
pub mod catalog_service;
pub mod error;
pub mod progress_service;
pub mod sample;

pub use learnhub_core::Clock;

pub use app_services::AppServices;
pub use assessment::{AssessmentAttempt, AssessmentService, ASSESSMENT_TIME_LIMIT_SECS};
pub use catalog_service::CatalogService;
pub use error::{AppServicesError, AssessmentError, CatalogError, ProgressError};
pub use progress_service::ProgressService;
