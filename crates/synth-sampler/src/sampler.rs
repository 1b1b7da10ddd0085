//! Row samplers for both streams.

use crate::error::SamplerError;
use crate::generators::{generate_decimal, generate_int, generate_text, generate_timestamp};
use crate::generators::timestamp::generate_lag;
use crate::profile::{LedgerProfile, ProcessorProfile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use synth_core::{LedgerDraft, ProcessorRecord};
use tracing::debug;

/// Capability to draw rows for one stream.
///
/// `sample(count)` returns exactly `count` rows in order. Repeated calls may
/// return different rows; a call has no effect outside the sampler.
pub trait RowSampler {
    type Row;

    fn sample(&mut self, count: usize) -> Result<Vec<Self::Row>, SamplerError>;
}

impl<S: RowSampler + ?Sized> RowSampler for Box<S> {
    type Row = S::Row;

    fn sample(&mut self, count: usize) -> Result<Vec<Self::Row>, SamplerError> {
        (**self).sample(count)
    }
}

/// Draws [`ProcessorRecord`] rows from a [`ProcessorProfile`].
pub struct ProcessorSampler {
    profile: ProcessorProfile,
    rng: StdRng,
    /// Rows drawn so far, fed to `{index}` placeholders
    index: u64,
}

impl ProcessorSampler {
    /// Create a sampler from a profile, validating it first.
    pub fn new(profile: ProcessorProfile, seed: u64) -> Result<Self, SamplerError> {
        profile.validate()?;
        Ok(Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
            index: 0,
        })
    }

    /// Load the profile at `path` and create a sampler from it.
    pub fn from_file<P: AsRef<Path>>(path: P, seed: u64) -> Result<Self, SamplerError> {
        Self::new(ProcessorProfile::from_file(path)?, seed)
    }

    /// Number of rows drawn so far.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    fn next_row(&mut self) -> ProcessorRecord {
        let index = self.index;
        let profile = &self.profile;
        let rng = &mut self.rng;

        let row = ProcessorRecord {
            external_id: generate_text(&profile.external_id, rng, index, None),
            amount: generate_decimal(&profile.amount, rng),
            currency: generate_text(&profile.currency, rng, index, None),
            created_at: generate_timestamp(&profile.created_at, rng),
        };

        self.index += 1;
        row
    }
}

impl RowSampler for ProcessorSampler {
    type Row = ProcessorRecord;

    fn sample(&mut self, count: usize) -> Result<Vec<ProcessorRecord>, SamplerError> {
        let rows: Vec<_> = (0..count).map(|_| self.next_row()).collect();
        debug!("Sampled {} processor rows (next index {})", rows.len(), self.index);
        Ok(rows)
    }
}

/// Draws unlinked [`LedgerDraft`] rows from a [`LedgerProfile`].
pub struct LedgerSampler {
    profile: LedgerProfile,
    rng: StdRng,
    index: u64,
}

impl LedgerSampler {
    /// Create a sampler from a profile, validating it first.
    pub fn new(profile: LedgerProfile, seed: u64) -> Result<Self, SamplerError> {
        profile.validate()?;
        Ok(Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
            index: 0,
        })
    }

    /// Load the profile at `path` and create a sampler from it.
    pub fn from_file<P: AsRef<Path>>(path: P, seed: u64) -> Result<Self, SamplerError> {
        Self::new(LedgerProfile::from_file(path)?, seed)
    }

    pub fn current_index(&self) -> u64 {
        self.index
    }

    fn next_row(&mut self) -> Result<LedgerDraft, SamplerError> {
        let index = self.index;
        let profile = &self.profile;
        let rng = &mut self.rng;

        let external_id = generate_text(&profile.external_id, rng, index, None);
        let account_code = generate_int(&profile.account_code, rng);
        let credit_amount = generate_decimal(&profile.credit_amount, rng);
        let debit_amount = generate_decimal(&profile.debit_amount, rng);
        let memo = generate_text(&profile.memo, rng, index, Some(&external_id));
        let mut created_at = generate_timestamp(&profile.created_at, rng);
        if let Some(lag) = profile.posting_lag {
            created_at = generate_lag(rng, lag.min_minutes, lag.max_minutes)
                .and_then(|delta| created_at.checked_add_signed(delta))
                .ok_or_else(|| {
                    SamplerError::Sampling(format!(
                        "posting lag of {}..{} minutes overflows created_at {created_at} (row {index})",
                        lag.min_minutes, lag.max_minutes
                    ))
                })?;
        }

        self.index += 1;
        Ok(LedgerDraft {
            external_id,
            account_code,
            credit_amount,
            debit_amount,
            memo,
            created_at,
        })
    }
}

impl RowSampler for LedgerSampler {
    type Row = LedgerDraft;

    fn sample(&mut self, count: usize) -> Result<Vec<LedgerDraft>, SamplerError> {
        let rows = (0..count)
            .map(|_| self.next_row())
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Sampled {} ledger rows (next index {})", rows.len(), self.index);
        Ok(rows)
    }
}
