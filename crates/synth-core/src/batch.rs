//! Batch units of work.
//!
//! A batch moves through two states. The linker produces a [`LinkedBatch`],
//! in which every ledger row matches its processor row exactly. Applying the
//! anomaly plan consumes it and yields a [`Batch`], which is what gets
//! written. Neither is kept once its files are on disk.

use crate::records::{LedgerRecord, ProcessorRecord};

/// Global position of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchBounds {
    /// Batch index, also used for the partition file name.
    pub index: u64,
    /// Global index of the first row.
    pub start: u64,
    /// Number of rows. Only the final batch may be shorter than the batch size.
    pub len: usize,
}

impl BatchBounds {
    /// One past the last global index.
    pub fn end(&self) -> u64 {
        self.start + self.len as u64
    }
}

/// Both streams for one batch before anomalies, aligned row for row.
#[derive(Debug, Clone)]
pub struct LinkedBatch {
    pub bounds: BatchBounds,
    pub processor: Vec<ProcessorRecord>,
    pub ledger: Vec<LedgerRecord>,
}

/// Both streams for one batch after anomalies, ready to be written.
///
/// The ledger side may be shorter than the processor side by the number of
/// deletions planned inside this batch.
#[derive(Debug, Clone)]
pub struct Batch {
    pub bounds: BatchBounds,
    pub processor: Vec<ProcessorRecord>,
    pub ledger: Vec<LedgerRecord>,
}

impl Batch {
    pub fn index(&self) -> u64 {
        self.bounds.index
    }
}
