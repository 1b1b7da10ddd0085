//! Error type for the synthesis pipeline.

use synth_core::SynthError;
use synth_parquet::StoreError;
use synth_sampler::SamplerError;
use thiserror::Error;

/// Any failure that ends a run.
///
/// A user stopping the run at the interactive pause is not an error; it is
/// reported through [`crate::RunOutcome::Cancelled`].
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Synth(#[from] SynthError),

    #[error("Sampler error: {0}")]
    Sampler(#[from] SamplerError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Reading the confirmation input or installing the signal handler failed.
    #[error("Failed to wait for confirmation: {0}")]
    Gate(#[source] std::io::Error),
}

impl PipelineError {
    /// Returns true for errors raised by configuration validation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, PipelineError::Synth(e) if e.is_configuration())
    }
}
