//! Error types for partition reconciliation.

use synth_parquet::StoreError;
use thiserror::Error;

/// Errors that can occur during verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Reading a partition failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// A batch has a part in one stream but not the other.
    #[error("Batch {index} has no {stream} part")]
    UnpairedPart { stream: &'static str, index: u64 },

    /// The partitions were read but do not reconcile as expected.
    #[error(
        "Verification failed: {missing_in_ledger} missing in ledger, {modified} modified, \
         {mismatched} mismatched, {orphans} orphan ledger rows"
    )]
    VerificationFailed {
        missing_in_ledger: u64,
        modified: u64,
        mismatched: u64,
        orphans: u64,
    },
}
