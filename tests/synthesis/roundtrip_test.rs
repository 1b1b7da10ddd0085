//! models init -> generate -> verify.

use crate::config;
use recon_synth::{init_models, AutoContinue, Orchestrator};
use synth_parquet::PartitionRoots;
use synth_verify::{ExpectedCounts, PartitionVerifier};
use tempfile::TempDir;

#[tokio::test]
async fn test_generate_then_verify() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path(), 1_000, 150, "0.05", 20);
    init_models(&config.layout, false).unwrap();

    let summary = Orchestrator::new(config.clone(), AutoContinue)
        .run()
        .await
        .unwrap();
    assert_eq!(summary.batches_written, 7);

    let roots = PartitionRoots::new(
        config.layout.processor_root.clone(),
        config.layout.ledger_root.clone(),
    );
    let report = PartitionVerifier::new(roots).verify().unwrap();
    let expected = ExpectedCounts::from_config(&config).unwrap();

    assert!(report.conforms_to(&expected), "{}", report.summary(&expected));
    assert_eq!(report.processor_rows, 1_000);
    assert_eq!(report.ledger_rows, 980);
    assert_eq!(report.missing_in_ledger, 20);
    assert_eq!(report.modified, 30);
    assert_eq!(report.matched, 950);
}

#[tokio::test]
async fn test_verify_detects_wrong_quota() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path(), 100, 25, "0.1", 4);
    init_models(&config.layout, false).unwrap();
    Orchestrator::new(config.clone(), AutoContinue)
        .run()
        .await
        .unwrap();

    let roots = PartitionRoots::new(
        config.layout.processor_root.clone(),
        config.layout.ledger_root.clone(),
    );
    let report = PartitionVerifier::new(roots).verify().unwrap();

    let mut other = config.clone();
    other.deletions = 5;
    let expected = ExpectedCounts::from_config(&other).unwrap();

    assert!(report.is_consistent());
    assert!(!report.conforms_to(&expected));
    assert!(report.check(&expected).is_err());
}
