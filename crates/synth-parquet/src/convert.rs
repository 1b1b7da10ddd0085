//! Conversion between row structs and Arrow record batches.

use crate::error::StoreError;
use crate::schema::{ledger_schema, processor_schema, UTC_TZ};
use arrow::array::{
    Array, ArrayRef, Decimal128Array, Int32Array, StringArray, TimestampMicrosecondArray,
};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use synth_core::money::{self, MONEY_PRECISION, MONEY_SCALE};
use synth_core::{LedgerRecord, ProcessorRecord};

/// Build the Arrow batch for processor rows.
pub fn processor_batch(rows: &[ProcessorRecord]) -> Result<RecordBatch, StoreError> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.external_id.as_str()),
        )),
        Arc::new(money_array(rows.iter().map(|r| r.amount))?),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.currency.as_str()),
        )),
        Arc::new(timestamp_array(rows.iter().map(|r| r.created_at))),
    ];

    Ok(RecordBatch::try_new(processor_schema(), columns)?)
}

/// Build the Arrow batch for ledger rows.
pub fn ledger_batch(rows: &[LedgerRecord]) -> Result<RecordBatch, StoreError> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.external_id.as_str()),
        )),
        Arc::new(Int32Array::from_iter_values(
            rows.iter().map(|r| r.account_code),
        )),
        Arc::new(money_array(rows.iter().map(|r| r.credit_amount))?),
        Arc::new(money_array(rows.iter().map(|r| r.debit_amount))?),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.memo.as_str()),
        )),
        Arc::new(timestamp_array(rows.iter().map(|r| r.created_at))),
    ];

    Ok(RecordBatch::try_new(ledger_schema(), columns)?)
}

/// Read processor rows back out of an Arrow batch.
pub fn processor_rows(batch: &RecordBatch) -> Result<Vec<ProcessorRecord>, StoreError> {
    let external_id = column::<StringArray>(batch, "external_id")?;
    let amount = money_column(batch, "amount")?;
    let currency = column::<StringArray>(batch, "currency")?;
    let created_at = column::<TimestampMicrosecondArray>(batch, "created_at")?;

    (0..batch.num_rows())
        .map(|i| {
            Ok(ProcessorRecord {
                external_id: external_id.value(i).to_string(),
                amount: money_value(amount, i)?,
                currency: currency.value(i).to_string(),
                created_at: timestamp_value(created_at, i)?,
            })
        })
        .collect()
}

/// Read ledger rows back out of an Arrow batch.
pub fn ledger_rows(batch: &RecordBatch) -> Result<Vec<LedgerRecord>, StoreError> {
    let external_id = column::<StringArray>(batch, "external_id")?;
    let account_code = column::<Int32Array>(batch, "account_code")?;
    let credit_amount = money_column(batch, "credit_amount")?;
    let debit_amount = money_column(batch, "debit_amount")?;
    let memo = column::<StringArray>(batch, "memo")?;
    let created_at = column::<TimestampMicrosecondArray>(batch, "created_at")?;

    (0..batch.num_rows())
        .map(|i| {
            Ok(LedgerRecord {
                external_id: external_id.value(i).to_string(),
                account_code: account_code.value(i),
                credit_amount: money_value(credit_amount, i)?,
                debit_amount: money_value(debit_amount, i)?,
                memo: memo.value(i).to_string(),
                created_at: timestamp_value(created_at, i)?,
            })
        })
        .collect()
}

fn money_array(values: impl Iterator<Item = Decimal>) -> Result<Decimal128Array, StoreError> {
    let array = Decimal128Array::from_iter_values(values.map(money::to_units))
        .with_precision_and_scale(MONEY_PRECISION, MONEY_SCALE as i8)?;
    array.validate_decimal_precision(MONEY_PRECISION)?;
    Ok(array)
}

fn timestamp_array(values: impl Iterator<Item = DateTime<Utc>>) -> TimestampMicrosecondArray {
    TimestampMicrosecondArray::from_iter_values(values.map(|t| t.timestamp_micros()))
        .with_timezone(UTC_TZ)
}

fn column<'a, T: Array + 'static>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a T, StoreError> {
    let array = batch
        .column_by_name(name)
        .ok_or_else(|| StoreError::Schema(format!("missing column '{name}'")))?;

    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        StoreError::Schema(format!(
            "column '{name}' has unexpected type {}",
            array.data_type()
        ))
    })
}

fn money_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Decimal128Array, StoreError> {
    let array = column::<Decimal128Array>(batch, name)?;
    if array.scale() != MONEY_SCALE as i8 {
        return Err(StoreError::Schema(format!(
            "column '{name}' has scale {}, expected {MONEY_SCALE}",
            array.scale()
        )));
    }
    Ok(array)
}

fn money_value(array: &Decimal128Array, i: usize) -> Result<Decimal, StoreError> {
    let units = array.value(i);
    money::from_units(units)
        .ok_or_else(|| StoreError::Schema(format!("decimal mantissa {units} is out of range")))
}

fn timestamp_value(array: &TimestampMicrosecondArray, i: usize) -> Result<DateTime<Utc>, StoreError> {
    let micros = array.value(i);
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| StoreError::Schema(format!("timestamp {micros}us is out of range")))
}
