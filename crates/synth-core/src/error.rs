//! Error types shared across the synthesis pipeline.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by configuration, artifact loading and batch bookkeeping.
#[derive(Error, Debug)]
pub enum SynthError {
    /// Invalid run parameters. Always raised before any directory is touched.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// One or more sampler profiles could not be found.
    #[error("Missing sampler artifact(s): {}", join_paths(.paths))]
    MissingArtifact { paths: Vec<PathBuf> },

    /// IO failure with the path it happened on.
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The two streams could not be correlated for a batch.
    #[error("Failed to link batch {batch}: {reason}")]
    Link { batch: u64, reason: String },
}

impl SynthError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SynthError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true for errors raised by configuration validation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SynthError::Configuration(_))
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_lists_every_path() {
        let err = SynthError::MissingArtifact {
            paths: vec![
                PathBuf::from("/models/processor_model.yaml"),
                PathBuf::from("/models/ledger_model.yaml"),
            ],
        };

        assert_eq!(
            err.to_string(),
            "Missing sampler artifact(s): /models/processor_model.yaml, /models/ledger_model.yaml"
        );
    }

    #[test]
    fn test_io_error_carries_path() {
        let err = SynthError::io(
            "/data/ledger_bulk",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );

        assert!(err.to_string().contains("/data/ledger_bulk"));
        assert!(!err.is_configuration());
    }
}
