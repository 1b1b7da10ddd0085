//! Arrow schemas of the two streams.

use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use std::sync::Arc;
use synth_core::money::{MONEY_PRECISION, MONEY_SCALE};

/// Timezone stamped on every timestamp column.
pub const UTC_TZ: &str = "UTC";

pub fn money_type() -> DataType {
    DataType::Decimal128(MONEY_PRECISION, MONEY_SCALE as i8)
}

pub fn timestamp_type() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, Some(UTC_TZ.into()))
}

/// `external_id, amount, currency, created_at`
pub fn processor_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("external_id", DataType::Utf8, false),
        Field::new("amount", money_type(), false),
        Field::new("currency", DataType::Utf8, false),
        Field::new("created_at", timestamp_type(), false),
    ]))
}

/// `external_id, account_code, credit_amount, debit_amount, memo, created_at`
pub fn ledger_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("external_id", DataType::Utf8, false),
        Field::new("account_code", DataType::Int32, false),
        Field::new("credit_amount", money_type(), false),
        Field::new("debit_amount", money_type(), false),
        Field::new("memo", DataType::Utf8, false),
        Field::new("created_at", timestamp_type(), false),
    ]))
}
