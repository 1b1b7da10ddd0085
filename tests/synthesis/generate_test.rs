//! End-to-end generation runs.

use crate::{config, read_all_ledger, read_all_processor};
use recon_synth::{init_models, AutoContinue, Orchestrator, PipelineError, RunOutcome};
use std::collections::HashMap;
use synth_core::{money, SynthError};
use synth_parquet::list_parts;
use tempfile::TempDir;

#[tokio::test]
async fn test_small_run_plants_one_deletion_and_one_modification() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path(), 10, 5, "0.2", 1);
    init_models(&config.layout, false).unwrap();

    let summary = Orchestrator::new(config.clone(), AutoContinue)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.batches_written, 2);
    assert_eq!(summary.processor_rows, 10);
    assert_eq!(summary.ledger_rows, 9);
    assert_eq!(summary.modifications_applied, 1);
    assert_eq!(summary.deletions_applied, 1);

    let processor = read_all_processor(&config.layout.processor_root);
    let ledger = read_all_ledger(&config.layout.ledger_root);
    assert_eq!(processor.len(), 10);
    assert_eq!(ledger.len(), 9);

    let by_id: HashMap<_, _> = ledger.iter().map(|l| (l.external_id.as_str(), l)).collect();
    let mut missing = 0;
    let mut off_by_cent = 0;
    for row in &processor {
        assert!(row.external_id.starts_with("ch_"));
        assert_eq!(row.external_id.len(), 27);
        assert_eq!(row.amount.scale(), 4);

        let Some(ledger_row) = by_id.get(row.external_id.as_str()) else {
            missing += 1;
            continue;
        };
        assert_eq!(ledger_row.debit_amount, money::zero());
        assert_eq!(ledger_row.memo, format!("Stripe: {}", row.external_id));
        let delta = (ledger_row.credit_amount - row.amount).abs();
        if delta == money::minor_unit() {
            off_by_cent += 1;
        } else {
            assert!(delta.is_zero(), "unexpected delta {delta}");
        }
    }
    assert_eq!(missing, 1);
    assert_eq!(off_by_cent, 1);
}

#[tokio::test]
async fn test_excess_deletions_fail_before_touching_disk() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path(), 10, 5, "0.2", 3);
    init_models(&config.layout, false).unwrap();

    let err = Orchestrator::new(config.clone(), AutoContinue)
        .run()
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    assert!(!config.layout.processor_root.exists());
    assert!(!config.layout.ledger_root.exists());
}

#[tokio::test]
async fn test_invalid_config_keeps_previous_output() {
    let temp_dir = TempDir::new().unwrap();
    let good = config(temp_dir.path(), 10, 5, "0.2", 1);
    init_models(&good.layout, false).unwrap();
    Orchestrator::new(good.clone(), AutoContinue)
        .run()
        .await
        .unwrap();

    let bad = config(temp_dir.path(), 10, 0, "0.2", 1);
    assert!(Orchestrator::new(bad, AutoContinue).run().await.is_err());

    assert_eq!(list_parts(&good.layout.processor_root).unwrap().len(), 2);
    assert_eq!(list_parts(&good.layout.ledger_root).unwrap().len(), 2);
}

#[tokio::test]
async fn test_missing_profiles_are_all_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path(), 10, 5, "0.2", 1);

    let err = Orchestrator::new(config.clone(), AutoContinue)
        .run()
        .await
        .unwrap_err();

    match err {
        PipelineError::Synth(SynthError::MissingArtifact { paths }) => {
            assert_eq!(
                paths,
                vec![config.layout.processor_model(), config.layout.ledger_model()]
            );
        }
        other => panic!("expected missing artifact error, got {other:?}"),
    }
    assert_eq!(list_parts(&config.layout.processor_root).unwrap().len(), 0);
}

#[tokio::test]
async fn test_short_final_batch_receives_its_anomalies() {
    let temp_dir = TempDir::new().unwrap();
    // every row is an anomaly, so the 2-row tail batch must carry some
    let config = config(temp_dir.path(), 12, 5, "1", 3);
    init_models(&config.layout, false).unwrap();

    let summary = Orchestrator::new(config.clone(), AutoContinue)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.batches_written, 3);
    assert_eq!(summary.processor_rows, 12);
    assert_eq!(summary.deletions_applied, 3);
    assert_eq!(summary.modifications_applied, 9);
    let tail = &summary.batches[2];
    assert_eq!(tail.write.processor_rows, 2);
    assert_eq!(tail.applied.modified + tail.applied.deleted, 2);
}

#[tokio::test]
async fn test_rerun_replaces_previous_output() {
    let temp_dir = TempDir::new().unwrap();
    let first = config(temp_dir.path(), 20, 5, "0.1", 1);
    init_models(&first.layout, false).unwrap();
    Orchestrator::new(first.clone(), AutoContinue)
        .run()
        .await
        .unwrap();
    assert_eq!(list_parts(&first.layout.processor_root).unwrap().len(), 4);

    let second = config(temp_dir.path(), 20, 10, "0.1", 1);
    Orchestrator::new(second.clone(), AutoContinue)
        .run()
        .await
        .unwrap();

    assert_eq!(list_parts(&second.layout.processor_root).unwrap().len(), 2);
    assert_eq!(list_parts(&second.layout.ledger_root).unwrap().len(), 2);
    assert_eq!(read_all_processor(&second.layout.processor_root).len(), 20);
}

#[tokio::test]
async fn test_same_seed_same_output() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let config_a = config(a.path(), 30, 7, "0.2", 2);
    let config_b = config(b.path(), 30, 7, "0.2", 2);
    init_models(&config_a.layout, false).unwrap();
    init_models(&config_b.layout, false).unwrap();

    Orchestrator::new(config_a.clone(), AutoContinue).run().await.unwrap();
    Orchestrator::new(config_b.clone(), AutoContinue).run().await.unwrap();

    assert_eq!(
        read_all_processor(&config_a.layout.processor_root),
        read_all_processor(&config_b.layout.processor_root)
    );
    assert_eq!(
        read_all_ledger(&config_a.layout.ledger_root),
        read_all_ledger(&config_b.layout.ledger_root)
    );
}
