//! recon-synth library
//!
//! Generates two correlated datasets of the same financial events, a
//! payment-processor export and a general-ledger export, with a fixed quota
//! of planted discrepancies for exercising reconciliation logic.
//!
//! # Pipeline
//!
//! ```text
//! validate config ─► reset output roots ─► load sampler profiles ─► draw AnomalyPlan
//!                                                                        │
//!        ┌───────────────────────────────────────────────────────────────┘
//!        ▼
//!   for each batch:  BatchLinker ─► AnomalyApplier ─► BatchWriter ─► BatchGate
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Write default sampler profiles to $DATA_PATH_RAW/models
//! recon-synth models init
//!
//! # Generate 1.5M rows per stream in batches of 150k, pausing after each batch
//! recon-synth generate --interactive
//!
//! # Re-read both partition roots and check the planted anomalies
//! recon-synth verify
//! ```

pub mod anomaly;
pub mod args;
pub mod error;
pub mod gate;
pub mod linker;
pub mod models;
pub mod orchestrator;

pub use anomaly::{AnomalyApplier, AppliedAnomalies};
pub use error::PipelineError;
pub use gate::{AutoContinue, BatchGate, GateDecision, InteractiveGate, StopSignal};
pub use linker::{link_row, link_rows, BatchLinker};
pub use models::{init_models, ModelsInit};
pub use orchestrator::{BatchMetrics, Orchestrator, RunOutcome, RunSummary};
