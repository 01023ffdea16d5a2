use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::Response;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of an in-progress quiz attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    pub current_index: usize,
    pub responses: Vec<Response>,
    pub saved_at: DateTime<Utc>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(current_index: usize, responses: Vec<Response>, saved_at: DateTime<Utc>) -> Self {
        Self {
            current_index,
            responses,
            saved_at,
        }
    }
}

/// Save/load contract for quiz progress. A store holds at most one record.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Fetch the stored record, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record exists but cannot be read.
    async fn load(&self) -> Result<Option<ProgressRecord>, StorageError>;

    /// Remove the stored record. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn clear(&self) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn exists(&self) -> Result<bool, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<Option<ProgressRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl ProgressStore for InMemoryRepository {
    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(record.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }

    async fn exists(&self) -> Result<bool, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.is_some())
    }
}

/// Progress store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressStore> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}
