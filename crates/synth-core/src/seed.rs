//! Seed derivation for the independent RNG streams of a run.
//!
//! A run has one user-facing seed. Each consumer (planner, the two samplers,
//! and the per-batch sign draws) gets its own seed derived from it, so that
//! changing how many values one consumer draws never shifts another.

/// Golden-ratio increment used to spread derived seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Independent RNG streams within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStream {
    Plan,
    ProcessorSampler,
    LedgerSampler,
    /// Sign draws for the modifications of one batch.
    Anomalies { batch: u64 },
}

impl SeedStream {
    fn ordinal(self) -> u64 {
        match self {
            SeedStream::Plan => 0,
            SeedStream::ProcessorSampler => 1,
            SeedStream::LedgerSampler => 2,
            SeedStream::Anomalies { batch } => batch.wrapping_add(3),
        }
    }
}

/// Derive the seed for one stream from the run seed.
pub fn derive_seed(base: u64, stream: SeedStream) -> u64 {
    base.wrapping_add(stream.ordinal().wrapping_add(1).wrapping_mul(SEED_STRIDE))
}
