//! Global anomaly placement.
//!
//! The plan is computed once per run, before the first batch is sampled, and
//! is read-only from then on. Each batch asks it for the slice of indices that
//! falls inside its own global range, so the fixed quota of deletions and
//! modifications lands exactly once no matter how the rows are batched.
//!
//! ```text
//!   global rows  0 ........................................ N-1
//!   plan         {  d  m        m   d        m       d   m  }
//!   batches      [ batch 0 ][ batch 1 ][ batch 2 ][ batch 3 ]
//!                     │
//!                     └─ slice(start, len) -> local offsets
//! ```

use crate::error::SynthError;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Deletion and modification indices for a whole run.
///
/// Invariants: the two sets are disjoint, every index is `< total_rows`, and
/// together they hold exactly `floor(total_rows * rate)` indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyPlan {
    total_rows: u64,
    deletions: BTreeSet<u64>,
    modifications: BTreeSet<u64>,
}

/// The part of an [`AnomalyPlan`] that falls inside one batch, as local offsets.
///
/// Both lists are sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchAnomalies {
    pub modifications: Vec<usize>,
    pub deletions: Vec<usize>,
}

impl BatchAnomalies {
    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty() && self.deletions.is_empty()
    }
}

impl AnomalyPlan {
    /// Number of anomalous rows for a run: `floor(total_rows * rate)`.
    ///
    /// The rate is a decimal so the product is exact.
    pub fn anomaly_count(total_rows: u64, rate: Decimal) -> Result<u64, SynthError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(SynthError::Configuration(format!(
                "anomaly rate must be within [0, 1], got {rate}"
            )));
        }

        Decimal::from(total_rows)
            .checked_mul(rate)
            .and_then(|product| product.floor().to_u64())
            .ok_or_else(|| {
                SynthError::Configuration(format!(
                    "anomaly count overflows for {total_rows} rows at rate {rate}"
                ))
            })
    }

    /// Draw the plan.
    ///
    /// `K = floor(total_rows * rate)` distinct indices are drawn uniformly
    /// without replacement from `[0, total_rows)` in shuffled order. The first
    /// `deletions` become deletions and the rest modifications.
    pub fn plan<R: Rng + ?Sized>(
        total_rows: u64,
        rate: Decimal,
        deletions: u64,
        rng: &mut R,
    ) -> Result<Self, SynthError> {
        let anomalies = Self::anomaly_count(total_rows, rate)?;
        if deletions > anomalies {
            return Err(SynthError::Configuration(format!(
                "deletion count {deletions} exceeds the {anomalies} anomalies planned \
                 for {total_rows} rows at rate {rate}"
            )));
        }

        let length = usize::try_from(total_rows).map_err(|_| {
            SynthError::Configuration(format!("row count {total_rows} exceeds addressable memory"))
        })?;
        // anomalies <= total_rows because rate <= 1
        let drawn = rand::seq::index::sample(rng, length, anomalies as usize).into_vec();

        let (deleted, modified) = drawn.split_at(deletions as usize);
        Ok(Self {
            total_rows,
            deletions: deleted.iter().map(|&i| i as u64).collect(),
            modifications: modified.iter().map(|&i| i as u64).collect(),
        })
    }

    /// Build a plan from explicit index sets, checking every invariant.
    pub fn from_indices(
        total_rows: u64,
        deletions: BTreeSet<u64>,
        modifications: BTreeSet<u64>,
    ) -> Result<Self, SynthError> {
        if let Some(shared) = deletions.intersection(&modifications).next() {
            return Err(SynthError::Configuration(format!(
                "row {shared} is planned as both a deletion and a modification"
            )));
        }
        let out_of_range = deletions
            .iter()
            .chain(modifications.iter())
            .find(|&&i| i >= total_rows);
        if let Some(index) = out_of_range {
            return Err(SynthError::Configuration(format!(
                "anomaly index {index} is outside [0, {total_rows})"
            )));
        }

        Ok(Self {
            total_rows,
            deletions,
            modifications,
        })
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn deletions(&self) -> &BTreeSet<u64> {
        &self.deletions
    }

    pub fn modifications(&self) -> &BTreeSet<u64> {
        &self.modifications
    }

    /// Total number of anomalous rows.
    pub fn len(&self) -> usize {
        self.deletions.len() + self.modifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Local offsets of the planned anomalies inside `[start, start + len)`.
    pub fn slice(&self, start: u64, len: usize) -> BatchAnomalies {
        let end = start.saturating_add(len as u64);
        let local = |set: &BTreeSet<u64>| -> Vec<usize> {
            set.range(start..end).map(|&g| (g - start) as usize).collect()
        };

        BatchAnomalies {
            modifications: local(&self.modifications),
            deletions: local(&self.deletions),
        }
    }
}
