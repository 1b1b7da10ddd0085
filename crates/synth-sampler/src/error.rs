//! Error types for sampler profiles and sampling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a profile or drawing rows.
#[derive(Error, Debug)]
pub enum SamplerError {
    /// Profile file could not be read.
    #[error("Failed to read profile {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile is not valid YAML for its stream.
    #[error("Failed to parse profile: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Profile parsed but describes impossible values.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// A sampler could not produce the requested rows.
    #[error("Sampling failed: {0}")]
    Sampling(String),
}
