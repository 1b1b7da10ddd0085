//! Reconciliation report types.

use crate::error::VerifyError;
use std::time::Duration;
use synth_core::{SynthError, SynthesisConfig};

/// Maximum number of mismatch details kept in a report.
pub const MAX_MISMATCH_DETAILS: usize = 100;

/// Information about a row pair that did not reconcile.
#[derive(Debug, Clone)]
pub struct MismatchInfo {
    /// Batch the row was found in.
    pub batch: u64,
    pub external_id: String,
    /// Field that differs, or `external_id` for orphan ledger rows.
    pub field: String,
    pub expected: String,
    pub actual: String,
}

/// Row and anomaly counts a run is configured to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedCounts {
    pub total_rows: u64,
    pub batches: u64,
    pub deletions: u64,
    pub modifications: u64,
}

impl ExpectedCounts {
    /// Counts implied by a run configuration.
    pub fn from_config(config: &SynthesisConfig) -> Result<Self, SynthError> {
        let anomalies = config.validate()?;
        Ok(Self {
            total_rows: config.total_rows,
            batches: config.batch_count(),
            deletions: config.deletions,
            modifications: anomalies - config.deletions,
        })
    }
}

/// Outcome of reconciling both partition roots.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationReport {
    /// Number of batch pairs read.
    pub parts: u64,
    pub processor_rows: u64,
    pub ledger_rows: u64,
    pub matched: u64,
    pub missing_in_ledger: u64,
    pub modified: u64,
    pub mismatched: u64,
    /// Ledger rows with no processor row of the same identifier in their batch.
    pub orphan_ledger_rows: u64,
    /// First [`MAX_MISMATCH_DETAILS`] mismatched or orphan rows.
    pub mismatches: Vec<MismatchInfo>,
    pub total_duration: Duration,
    pub read_duration: Duration,
    pub compare_duration: Duration,
}

impl ReconciliationReport {
    /// Every row is a match or one of the two planned anomaly kinds.
    pub fn is_consistent(&self) -> bool {
        self.mismatched == 0 && self.orphan_ledger_rows == 0
    }

    /// Consistent and carrying exactly the expected rows and anomalies.
    pub fn conforms_to(&self, expected: &ExpectedCounts) -> bool {
        self.is_consistent()
            && self.parts == expected.batches
            && self.processor_rows == expected.total_rows
            && self.missing_in_ledger == expected.deletions
            && self.modified == expected.modifications
    }

    /// Turn a non-conforming report into an error.
    pub fn check(&self, expected: &ExpectedCounts) -> Result<(), VerifyError> {
        if self.conforms_to(expected) {
            Ok(())
        } else {
            Err(VerifyError::VerificationFailed {
                missing_in_ledger: self.missing_in_ledger,
                modified: self.modified,
                mismatched: self.mismatched,
                orphans: self.orphan_ledger_rows,
            })
        }
    }

    pub(crate) fn record_mismatch(&mut self, info: MismatchInfo) {
        if self.mismatches.len() < MAX_MISMATCH_DETAILS {
            self.mismatches.push(info);
        }
    }

    /// Calculate verification rate (processor rows per second).
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.processor_rows as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Get a summary string.
    pub fn summary(&self, expected: &ExpectedCounts) -> String {
        if self.conforms_to(expected) {
            format!(
                "Verification PASSED: {} processor rows, {} ledger rows in {} batches \
                 ({} matched, {} missing in ledger, {} modified) in {:?}",
                self.processor_rows,
                self.ledger_rows,
                self.parts,
                self.matched,
                self.missing_in_ledger,
                self.modified,
                self.total_duration
            )
        } else {
            format!(
                "Verification FAILED: {} processor rows in {} batches (expected {} in {}), \
                 {} missing in ledger (expected {}), {} modified (expected {}), \
                 {} mismatched, {} orphan ledger rows",
                self.processor_rows,
                self.parts,
                expected.total_rows,
                expected.batches,
                self.missing_in_ledger,
                expected.deletions,
                self.modified,
                expected.modifications,
                self.mismatched,
                self.orphan_ledger_rows
            )
        }
    }
}
