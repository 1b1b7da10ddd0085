//! Reconciliation of written partitions.
//!
//! Re-reads the processor and ledger partition roots one batch pair at a time
//! and classifies every row:
//!
//! - matched: ledger credit equals processor amount, debit is zero
//! - missing in ledger: the processor row has no ledger counterpart
//! - modified: the credit differs from the amount by exactly one minor unit
//! - mismatched: any other difference
//! - orphan: a ledger row whose identifier is not in the processor part
//!
//! # Example
//!
//! ```ignore
//! use synth_parquet::PartitionRoots;
//! use synth_verify::{ExpectedCounts, PartitionVerifier};
//!
//! let verifier = PartitionVerifier::new(PartitionRoots::new(processor_root, ledger_root));
//! let report = verifier.verify()?;
//! report.check(&ExpectedCounts::from_config(&config)?)?;
//! ```

pub mod compare;
pub mod error;
pub mod report;
pub mod verifier;

pub use compare::{compare_pair, PairOutcome};
pub use error::VerifyError;
pub use report::{ExpectedCounts, MismatchInfo, ReconciliationReport};
pub use verifier::PartitionVerifier;
