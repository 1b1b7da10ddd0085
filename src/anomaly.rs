//! Applying the anomaly plan to one batch.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use synth_core::money;
use synth_core::seed::{derive_seed, SeedStream};
use synth_core::{AnomalyPlan, Batch, LinkedBatch, SynthError};
use tracing::debug;

/// Number of anomalies applied to a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedAnomalies {
    pub modified: usize,
    pub deleted: usize,
}

/// Mutates the ledger side of a linked batch according to the plan.
///
/// Each batch gets its own sign RNG seeded from the run seed and the batch
/// index, so a batch's output does not depend on the batches before it.
pub struct AnomalyApplier {
    rng: StdRng,
}

impl AnomalyApplier {
    pub fn for_batch(seed: u64, batch: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(derive_seed(seed, SeedStream::Anomalies { batch })),
        }
    }

    /// Apply the plan's slice for this batch.
    ///
    /// Modifications move the credit amount by one minor unit up or down.
    /// They are applied before deletions, while local offsets still line up
    /// with the processor rows. Deleted ledger rows are removed; their
    /// processor rows stay.
    ///
    /// Both streams must hold exactly `bounds.len` rows, otherwise planned
    /// offsets would miss their rows.
    pub fn apply(
        &mut self,
        plan: &AnomalyPlan,
        linked: LinkedBatch,
    ) -> Result<(Batch, AppliedAnomalies), SynthError> {
        let LinkedBatch {
            bounds,
            processor,
            mut ledger,
        } = linked;
        if processor.len() != bounds.len || ledger.len() != bounds.len {
            return Err(SynthError::Link {
                batch: bounds.index,
                reason: format!(
                    "expected {} rows per stream before anomalies, got {} processor and {} ledger",
                    bounds.len,
                    processor.len(),
                    ledger.len()
                ),
            });
        }
        let slice = plan.slice(bounds.start, bounds.len);
        let mut applied = AppliedAnomalies::default();

        for &offset in &slice.modifications {
            let delta = if self.rng.gen_bool(0.5) {
                money::minor_unit()
            } else {
                -money::minor_unit()
            };
            let row = &mut ledger[offset];
            row.credit_amount = money::money(row.credit_amount + delta);
            applied.modified += 1;
        }

        if !slice.deletions.is_empty() {
            let before = ledger.len();
            let mut position = 0usize;
            ledger.retain(|_| {
                let keep = slice.deletions.binary_search(&position).is_err();
                position += 1;
                keep
            });
            applied.deleted = before - ledger.len();
        }

        debug!(
            "Batch {}: modifications at {:?}, deletions at {:?}",
            bounds.index, slice.modifications, slice.deletions
        );

        Ok((
            Batch {
                bounds,
                processor,
                ledger,
            },
            applied,
        ))
    }
}
