//! Core types for the recon-synth framework.
//!
//! This crate provides the foundational types shared by every stage of the
//! synthesis pipeline:
//!
//! - [`ProcessorRecord`] / [`LedgerRecord`] - the two correlated streams
//! - [`money`] - scale-4 fixed-point helpers built on `rust_decimal`
//! - [`AnomalyPlan`] - the global, immutable placement of deletions and modifications
//! - [`SynthesisConfig`] - run parameters and their validation
//! - [`SynthError`] - configuration, missing-artifact and IO failures
//!
//! # Architecture
//!
//! ```text
//! synth-core (this crate)
//!    │
//!    ├─── synth-sampler   (draws ProcessorRecord / LedgerDraft rows)
//!    ├─── synth-parquet   (writes and reads partition files)
//!    ├─── synth-verify    (reconciles written partitions)
//!    └─── recon-synth     (linker, applier, orchestrator, CLI)
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod money;
pub mod plan;
pub mod records;
pub mod seed;

// Re-exports for convenience
pub use batch::{Batch, BatchBounds, LinkedBatch};
pub use config::{StorageLayout, SynthesisConfig, DEFAULT_BASE_PATH};
pub use error::SynthError;
pub use plan::{AnomalyPlan, BatchAnomalies};
pub use records::{LedgerDraft, LedgerRecord, ProcessorRecord};
