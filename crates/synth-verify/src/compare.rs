//! Row-pair comparison.

use rust_decimal::Decimal;
use synth_core::money;
use synth_core::{LedgerRecord, ProcessorRecord};

/// Result of comparing a ledger row with its processor counterpart.
#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    /// Credit equals the processor amount and debit is zero.
    Match,
    /// Credit differs from the processor amount by exactly one minor unit.
    Modified { delta: Decimal },
    /// Any other difference.
    Mismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },
}

/// Compare a ledger row with the processor row it references.
///
/// The caller pairs rows by `external_id`; only the monetary fields are
/// compared here.
pub fn compare_pair(processor: &ProcessorRecord, ledger: &LedgerRecord) -> PairOutcome {
    if ledger.debit_amount != Decimal::ZERO {
        return PairOutcome::Mismatch {
            field: "debit_amount",
            expected: money::zero().to_string(),
            actual: ledger.debit_amount.to_string(),
        };
    }

    let delta = ledger.credit_amount - processor.amount;
    if delta.is_zero() {
        PairOutcome::Match
    } else if delta.abs() == money::minor_unit() {
        PairOutcome::Modified {
            delta: money::money(delta),
        }
    } else {
        PairOutcome::Mismatch {
            field: "credit_amount",
            expected: processor.amount.to_string(),
            actual: ledger.credit_amount.to_string(),
        }
    }
}
