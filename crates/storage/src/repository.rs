use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use learnhub_core::model::{CompletionRecord, CourseId, LessonId, ProgressRecord, UserId};

use crate::keys;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── STORE CONTRACT ────────────────────────────────────────────────────────────
//

/// Durable key-value collaborator for learner state.
///
/// This is the only I/O seam of the progress tracker: swapping the in-memory
/// map for the `SQLite` backend must not change tracker behavior. Values are
/// opaque strings; the typed encodings live on [`Storage`].
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Fetch the raw value for a key, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the raw value for a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY STORE ───────────────────────────────────────────────────────────
//

/// Simple in-memory store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProgressStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

//
// ─── TYPED RECORD ACCESS ───────────────────────────────────────────────────────
//

/// Key-value store behind a trait object, with the typed record encodings
/// the tracker relies on layered on top.
///
/// Encodings match what the original front end kept in browser storage: a
/// JSON object of watched flags per `progress_{user}_{course}` key, a JSON
/// array of course ids under `completed_{user}`, and a bare lesson id under
/// `last_lesson_{user}_{course}`.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn ProgressStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            kv: Arc::new(InMemoryStore::new()),
        }
    }

    /// Load the watched-lesson record, defaulting to empty when the key has
    /// never been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decode failure.
    pub async fn load_progress(
        &self,
        user: &UserId,
        course: &CourseId,
    ) -> Result<ProgressRecord, StorageError> {
        match self.kv.get(&keys::progress(user, course)).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))
            }
            None => Ok(ProgressRecord::default()),
        }
    }

    /// Persist the watched-lesson record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or encode failure.
    pub async fn save_progress(
        &self,
        user: &UserId,
        course: &CourseId,
        record: &ProgressRecord,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.set(&keys::progress(user, course), &raw).await
    }

    /// Load the learner's passed-course set, defaulting to empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decode failure.
    pub async fn load_completions(&self, user: &UserId) -> Result<CompletionRecord, StorageError> {
        match self.kv.get(&keys::completed(user)).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))
            }
            None => Ok(CompletionRecord::default()),
        }
    }

    /// Persist the learner's passed-course set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or encode failure.
    pub async fn save_completions(
        &self,
        user: &UserId,
        record: &CompletionRecord,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.set(&keys::completed(user), &raw).await
    }

    /// Load the learner's resume point for a course, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_last_lesson(
        &self,
        user: &UserId,
        course: &CourseId,
    ) -> Result<Option<LessonId>, StorageError> {
        Ok(self
            .kv
            .get(&keys::last_lesson(user, course))
            .await?
            .map(LessonId::new))
    }

    /// Persist the learner's resume point for a course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn save_last_lesson(
        &self,
        user: &UserId,
        course: &CourseId,
        lesson: &LessonId,
    ) -> Result<(), StorageError> {
        self.kv
            .set(&keys::last_lesson(user, course), lesson.as_str())
            .await
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_get_set_round_trip() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn progress_record_round_trips_through_store() {
        let storage = Storage::in_memory();
        let user = UserId::new("u-1");
        let course = CourseId::new("react-complete-guide");

        let loaded = storage.load_progress(&user, &course).await.unwrap();
        assert_eq!(loaded, ProgressRecord::default());

        let mut record = ProgressRecord::default();
        record.mark_watched(LessonId::new("react-lesson-1"));
        storage.save_progress(&user, &course, &record).await.unwrap();

        let loaded = storage.load_progress(&user, &course).await.unwrap();
        assert_eq!(loaded, record);

        // The persisted shape is the flat JSON object of watched flags.
        let raw = storage
            .kv
            .get("progress_u-1_react-complete-guide")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw, r#"{"react-lesson-1":true}"#);
    }

    #[tokio::test]
    async fn completions_round_trip_through_store() {
        let storage = Storage::in_memory();
        let user = UserId::new("u-1");

        let mut record = storage.load_completions(&user).await.unwrap();
        assert!(record.is_empty());
        record.add(CourseId::new("nodejs-mastery"));
        storage.save_completions(&user, &record).await.unwrap();

        let loaded = storage.load_completions(&user).await.unwrap();
        assert!(loaded.contains(&CourseId::new("nodejs-mastery")));

        let raw = storage.kv.get("completed_u-1").await.unwrap().unwrap();
        assert_eq!(raw, r#"["nodejs-mastery"]"#);
    }

    #[tokio::test]
    async fn last_lesson_stores_bare_id() {
        let storage = Storage::in_memory();
        let user = UserId::new("u-1");
        let course = CourseId::new("react-complete-guide");

        assert_eq!(storage.load_last_lesson(&user, &course).await.unwrap(), None);
        storage
            .save_last_lesson(&user, &course, &LessonId::new("react-lesson-3"))
            .await
            .unwrap();
        assert_eq!(
            storage.load_last_lesson(&user, &course).await.unwrap(),
            Some(LessonId::new("react-lesson-3"))
        );
        let raw = storage
            .kv
            .get("last_lesson_u-1_react-complete-guide")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw, "react-lesson-3");
    }

    #[tokio::test]
    async fn corrupt_progress_payload_surfaces_serialization_error() {
        let storage = Storage::in_memory();
        let user = UserId::new("u-1");
        let course = CourseId::new("c");
        storage
            .kv
            .set("progress_u-1_c", "not json")
            .await
            .unwrap();
        let err = storage.load_progress(&user, &course).await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
