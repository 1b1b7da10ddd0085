//! Synthesis integration tests.
//!
//! Each test runs against a fresh temporary base path:
//! 1. Writes sampler profiles into `<base>/models`
//! 2. Runs the pipeline (or a part of it) with a fixed seed
//! 3. Reads the partitions back and checks rows and planted anomalies

mod generate_test;
mod interactive_test;
mod linking_test;
mod roundtrip_test;

use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use synth_core::{LedgerRecord, ProcessorRecord, StorageLayout, SynthesisConfig};
use synth_parquet::{list_parts, read_ledger_part, read_processor_part};

pub const SEED: u64 = 42;

pub fn config(base: &Path, total_rows: u64, batch_size: usize, rate: &str, deletions: u64) -> SynthesisConfig {
    SynthesisConfig {
        total_rows,
        batch_size,
        anomaly_rate: Decimal::from_str(rate).unwrap(),
        deletions,
        seed: SEED,
        layout: StorageLayout::from_base(base),
    }
}

pub fn read_all_processor(root: &Path) -> Vec<ProcessorRecord> {
    list_parts(root)
        .unwrap()
        .iter()
        .flat_map(|part| read_processor_part(&part.path).unwrap())
        .collect()
}

pub fn read_all_ledger(root: &Path) -> Vec<LedgerRecord> {
    list_parts(root)
        .unwrap()
        .iter()
        .flat_map(|part| read_ledger_part(&part.path).unwrap())
        .collect()
}
