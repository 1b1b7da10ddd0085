//! Row types for the processor and ledger streams.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// One transaction as exported by the payment processor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorRecord {
    /// Globally unique charge identifier (`ch_` + 24 alphanumerics by default).
    pub external_id: String,
    /// Charged amount at scale 4.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: String,
    /// Event time.
    pub created_at: DateTime<Utc>,
}

/// One general-ledger posting, correlated with a [`ProcessorRecord`].
///
/// `external_id` references the processor row by value. Before anomalies are
/// applied, `credit_amount` equals the processor amount and `debit_amount` is
/// zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRecord {
    pub external_id: String,
    pub account_code: i32,
    pub credit_amount: Decimal,
    pub debit_amount: Decimal,
    pub memo: String,
    pub created_at: DateTime<Utc>,
}

/// A ledger row exactly as a sampler produced it, before it has been linked
/// to its processor counterpart.
///
/// Only the linker turns a draft into a [`LedgerRecord`], which keeps unlinked
/// rows from reaching storage.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerDraft {
    pub external_id: String,
    pub account_code: i32,
    pub credit_amount: Decimal,
    pub debit_amount: Decimal,
    pub memo: String,
    pub created_at: DateTime<Utc>,
}
