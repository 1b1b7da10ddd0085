//! Linking with ledger samplers that disagree with the processor stream.

use crate::{config, read_all_ledger, read_all_processor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use recon_synth::{AnomalyApplier, BatchLinker};
use rust_decimal::Decimal;
use synth_core::AnomalyPlan;
use synth_parquet::{BatchWriter, PartitionRoots};
use synth_sampler::{
    DecimalGenerator, LedgerProfile, LedgerSampler, ProcessorProfile, ProcessorSampler,
    TextGenerator,
};
use synth_verify::{ExpectedCounts, PartitionVerifier};
use tempfile::TempDir;

/// A ledger profile whose native rows never match the processor stream:
/// different identifiers, unrelated amounts and a non-zero debit.
fn disagreeing_ledger_profile() -> LedgerProfile {
    LedgerProfile {
        external_id: TextGenerator::Pattern {
            pattern: "po_{rand:10}".to_string(),
        },
        credit_amount: DecimalGenerator::DecimalRange {
            min: Decimal::new(1, 4),
            max: Decimal::new(99_990_000, 4),
        },
        debit_amount: DecimalGenerator::DecimalRange {
            min: Decimal::new(10_000, 4),
            max: Decimal::new(50_000, 4),
        },
        ..LedgerProfile::default()
    }
}

#[test]
fn test_disagreeing_sampler_does_not_change_anomaly_counts() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path(), 40, 8, "0.25", 4);
    let anomalies = config.validate().unwrap();

    let roots = PartitionRoots::new(
        config.layout.processor_root.clone(),
        config.layout.ledger_root.clone(),
    );
    roots.reset().unwrap();
    let writer = BatchWriter::new(roots.clone());

    let mut linker = BatchLinker::new(
        ProcessorSampler::new(ProcessorProfile::default(), 1).unwrap(),
        LedgerSampler::new(disagreeing_ledger_profile(), 2).unwrap(),
    );
    let plan = AnomalyPlan::plan(
        config.total_rows,
        config.anomaly_rate,
        config.deletions,
        &mut StdRng::seed_from_u64(3),
    )
    .unwrap();

    for bounds in config.batches() {
        let linked = linker.link(bounds).unwrap();
        let (batch, _) = AnomalyApplier::for_batch(config.seed, bounds.index)
            .apply(&plan, linked)
            .unwrap();
        writer.write(&batch).unwrap();
    }

    let report = PartitionVerifier::new(roots).verify().unwrap();
    let expected = ExpectedCounts::from_config(&config).unwrap();

    assert_eq!(report.missing_in_ledger, 4);
    assert_eq!(report.modified, anomalies - 4);
    assert_eq!(report.matched, 40 - anomalies);
    assert!(report.conforms_to(&expected), "{}", report.summary(&expected));

    let processor = read_all_processor(&config.layout.processor_root);
    for ledger in read_all_ledger(&config.layout.ledger_root) {
        assert!(ledger.external_id.starts_with("ch_"));
        assert!(ledger.debit_amount.is_zero());
        assert!(ledger.memo.ends_with(&ledger.external_id));
        assert!(processor.iter().any(|p| p.external_id == ledger.external_id));
    }
}
