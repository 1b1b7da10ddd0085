//! Pausing and stopping between batches.

use crate::config;
use async_trait::async_trait;
use recon_synth::{
    init_models, BatchGate, GateDecision, InteractiveGate, Orchestrator, PipelineError, RunOutcome,
    StopSignal,
};
use std::time::Duration;
use synth_parquet::list_parts;
use tempfile::TempDir;

/// Records every confirmation request and always continues.
#[derive(Default)]
struct RecordingGate {
    calls: Vec<(u64, u64)>,
}

#[async_trait]
impl BatchGate for RecordingGate {
    async fn confirm(&mut self, completed: u64, total: u64) -> Result<GateDecision, PipelineError> {
        self.calls.push((completed, total));
        Ok(GateDecision::Continue)
    }
}

#[tokio::test]
async fn test_stop_after_first_of_three_batches() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path(), 15, 5, "0.2", 1);
    init_models(&config.layout, false).unwrap();

    let gate = InteractiveGate::from_reader(&b"q\n"[..], StopSignal::new());
    let summary = Orchestrator::new(config.clone(), gate).run().await.unwrap();

    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert_eq!(summary.batches_written, 1);
    assert_eq!(summary.total_batches, 3);
    assert_eq!(summary.processor_rows, 5);

    let processor_parts = list_parts(&config.layout.processor_root).unwrap();
    let ledger_parts = list_parts(&config.layout.ledger_root).unwrap();
    assert_eq!(processor_parts.len(), 1);
    assert_eq!(ledger_parts.len(), 1);
    assert_eq!(processor_parts[0].index, 0);
    assert_eq!(ledger_parts[0].index, 0);
}

#[tokio::test]
async fn test_enter_continues_to_completion() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path(), 15, 5, "0.2", 1);
    init_models(&config.layout, false).unwrap();

    let gate = InteractiveGate::from_reader(&b"\n\n"[..], StopSignal::new());
    let summary = Orchestrator::new(config.clone(), gate).run().await.unwrap();

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.batches_written, 3);
    assert_eq!(list_parts(&config.layout.ledger_root).unwrap().len(), 3);
}

#[tokio::test]
async fn test_stop_requested_mid_run_ends_at_batch_boundary() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path(), 15, 5, "0.2", 1);
    init_models(&config.layout, false).unwrap();

    // Input that never produces a line: only the stop request can end the wait.
    let (_input, reader) = tokio::io::duplex(64);
    let stop = StopSignal::new();
    stop.trigger();
    let gate = InteractiveGate::from_reader(reader, stop);

    let summary = tokio::time::timeout(
        Duration::from_secs(30),
        Orchestrator::new(config.clone(), gate).run(),
    )
    .await
    .expect("run kept waiting for input after a stop request")
    .unwrap();

    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert_eq!(summary.batches_written, 1);
    assert_eq!(list_parts(&config.layout.processor_root).unwrap().len(), 1);
    assert_eq!(list_parts(&config.layout.ledger_root).unwrap().len(), 1);
}

#[tokio::test]
async fn test_no_pause_after_last_batch() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path(), 15, 5, "0.2", 1);
    init_models(&config.layout, false).unwrap();

    let mut orchestrator = Orchestrator::new(config, RecordingGate::default());
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(orchestrator.gate().calls, vec![(1, 3), (2, 3)]);
}
