//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::ConfigurationError;
use quiz_core::model::SettingsError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while loading or running a quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    StorageInit(#[from] SqliteInitError),
    #[error("invalid quiz definition: {0}")]
    Definition(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
