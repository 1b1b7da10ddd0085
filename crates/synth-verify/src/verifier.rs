//! Batch-pair verifier.

use crate::compare::{compare_pair, PairOutcome};
use crate::error::VerifyError;
use crate::report::{MismatchInfo, ReconciliationReport};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use synth_core::LedgerRecord;
use synth_parquet::{list_parts, read_ledger_part, read_processor_part, PartitionRoots};
use tracing::{debug, info};

/// Reconciles the two partition roots, holding one batch pair in memory at a
/// time.
pub struct PartitionVerifier {
    roots: PartitionRoots,
}

impl PartitionVerifier {
    pub fn new(roots: PartitionRoots) -> Self {
        Self { roots }
    }

    /// Read every batch pair and classify each row.
    ///
    /// Every part index must be present in both roots.
    pub fn verify(&self) -> Result<ReconciliationReport, VerifyError> {
        let start_time = Instant::now();
        let pairs = self.pair_parts()?;
        let mut report = ReconciliationReport::default();

        info!(
            "Starting verification of {} batch pairs in {} and {}",
            pairs.len(),
            self.roots.processor.display(),
            self.roots.ledger.display()
        );

        let mut read_time = Duration::ZERO;
        let mut compare_time = Duration::ZERO;

        for (index, (processor_path, ledger_path)) in pairs {
            let read_start = Instant::now();
            let processor = read_processor_part(&processor_path)?;
            let ledger = read_ledger_part(&ledger_path)?;
            read_time += read_start.elapsed();

            let compare_start = Instant::now();
            report.parts += 1;
            report.processor_rows += processor.len() as u64;
            report.ledger_rows += ledger.len() as u64;

            let mut by_id: HashMap<&str, &LedgerRecord> = HashMap::with_capacity(ledger.len());
            for row in &ledger {
                if by_id.insert(row.external_id.as_str(), row).is_some() {
                    report.orphan_ledger_rows += 1;
                    report.record_mismatch(orphan(index, row, "duplicate ledger row"));
                }
            }

            for row in &processor {
                let Some(ledger_row) = by_id.remove(row.external_id.as_str()) else {
                    report.missing_in_ledger += 1;
                    continue;
                };
                match compare_pair(row, ledger_row) {
                    PairOutcome::Match => report.matched += 1,
                    PairOutcome::Modified { .. } => report.modified += 1,
                    PairOutcome::Mismatch {
                        field,
                        expected,
                        actual,
                    } => {
                        report.mismatched += 1;
                        report.record_mismatch(MismatchInfo {
                            batch: index,
                            external_id: row.external_id.clone(),
                            field: field.to_string(),
                            expected,
                            actual,
                        });
                    }
                }
            }

            let mut leftover: Vec<_> = by_id.into_values().collect();
            leftover.sort_by(|a, b| a.external_id.cmp(&b.external_id));
            for row in leftover {
                report.orphan_ledger_rows += 1;
                report.record_mismatch(orphan(index, row, "no processor row"));
            }
            compare_time += compare_start.elapsed();

            debug!(
                "Verified batch {}: {} processor rows, {} ledger rows",
                index,
                processor.len(),
                ledger.len()
            );
        }

        report.total_duration = start_time.elapsed();
        report.read_duration = read_time;
        report.compare_duration = compare_time;

        info!(
            "Verification complete: {} batch pairs in {:?} - {} matched, {} missing in ledger, \
             {} modified, {} mismatched, {} orphan",
            report.parts,
            report.total_duration,
            report.matched,
            report.missing_in_ledger,
            report.modified,
            report.mismatched,
            report.orphan_ledger_rows
        );

        Ok(report)
    }

    fn pair_parts(&self) -> Result<BTreeMap<u64, (PathBuf, PathBuf)>, VerifyError> {
        let mut ledger: BTreeMap<u64, PathBuf> = list_parts(&self.roots.ledger)?
            .into_iter()
            .map(|p| (p.index, p.path))
            .collect();

        let mut pairs = BTreeMap::new();
        for part in list_parts(&self.roots.processor)? {
            let ledger_path = ledger
                .remove(&part.index)
                .ok_or(VerifyError::UnpairedPart {
                    stream: "ledger",
                    index: part.index,
                })?;
            pairs.insert(part.index, (part.path, ledger_path));
        }

        if let Some(&index) = ledger.keys().next() {
            return Err(VerifyError::UnpairedPart {
                stream: "processor",
                index,
            });
        }
        Ok(pairs)
    }
}

fn orphan(batch: u64, row: &LedgerRecord, reason: &str) -> MismatchInfo {
    MismatchInfo {
        batch,
        external_id: row.external_id.clone(),
        field: "external_id".to_string(),
        expected: reason.to_string(),
        actual: row.external_id.clone(),
    }
}
