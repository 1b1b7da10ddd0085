//! Cross-stream linking.
//!
//! The processor batch is sampled first and its identifiers become the join
//! key for the ledger batch. Whatever the ledger sampler produced for the
//! identifier and the two amounts is overwritten, so a linked batch always
//! starts from a perfect match.

use crate::error::PipelineError;
use synth_core::money;
use synth_core::{BatchBounds, LedgerDraft, LedgerRecord, LinkedBatch, ProcessorRecord, SynthError};
use synth_sampler::RowSampler;
use tracing::debug;

/// Pulls one batch from each sampler and links the ledger rows to the
/// processor rows.
pub struct BatchLinker<P, L> {
    processor: P,
    ledger: L,
}

impl<P, L> BatchLinker<P, L>
where
    P: RowSampler<Row = ProcessorRecord>,
    L: RowSampler<Row = LedgerDraft>,
{
    pub fn new(processor: P, ledger: L) -> Self {
        Self { processor, ledger }
    }

    /// Sample and link the rows for one batch.
    pub fn link(&mut self, bounds: BatchBounds) -> Result<LinkedBatch, PipelineError> {
        let processor = self.processor.sample(bounds.len)?;
        if processor.len() != bounds.len {
            return Err(SynthError::Link {
                batch: bounds.index,
                reason: format!(
                    "processor sampler returned {} rows, expected {}",
                    processor.len(),
                    bounds.len
                ),
            }
            .into());
        }

        let drafts = self.ledger.sample(bounds.len)?;
        let ledger = link_rows(bounds.index, &processor, drafts)?;

        debug!(
            "Linked batch {} (global rows {}..{})",
            bounds.index,
            bounds.start,
            bounds.end()
        );
        Ok(LinkedBatch {
            bounds,
            processor,
            ledger,
        })
    }
}

/// Link ledger drafts to processor rows position by position.
///
/// Fails if the two sides have different lengths.
pub fn link_rows(
    batch: u64,
    processor: &[ProcessorRecord],
    drafts: Vec<LedgerDraft>,
) -> Result<Vec<LedgerRecord>, SynthError> {
    if drafts.len() != processor.len() {
        return Err(SynthError::Link {
            batch,
            reason: format!(
                "ledger sampler returned {} rows for {} processor rows",
                drafts.len(),
                processor.len()
            ),
        });
    }

    Ok(processor
        .iter()
        .zip(drafts)
        .map(|(row, draft)| link_row(row, draft))
        .collect())
}

/// Force a ledger draft to match its processor row.
pub fn link_row(processor: &ProcessorRecord, draft: LedgerDraft) -> LedgerRecord {
    let memo = if draft.external_id.is_empty() {
        draft.memo
    } else {
        draft.memo.replace(&draft.external_id, &processor.external_id)
    };

    LedgerRecord {
        external_id: processor.external_id.clone(),
        account_code: draft.account_code,
        credit_amount: money::money(processor.amount),
        debit_amount: money::zero(),
        memo,
        created_at: draft.created_at,
    }
}
