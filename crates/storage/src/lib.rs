#![forbid(unsafe_code)]

pub mod keys;
pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryStore, ProgressStore, Storage, StorageError};
pub use sqlite::{SqliteInitError, SqliteStore};
