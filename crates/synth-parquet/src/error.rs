//! Error types for partition storage.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing or reading partition files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error.
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Arrow error.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// File does not have the expected columns or types.
    #[error("Schema error: {0}")]
    Schema(String),
}

impl StoreError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
