//! The batch loop.

use crate::anomaly::{AnomalyApplier, AppliedAnomalies};
use crate::error::PipelineError;
use crate::gate::{BatchGate, GateDecision};
use crate::linker::BatchLinker;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use synth_core::seed::{derive_seed, SeedStream};
use synth_core::{AnomalyPlan, SynthError, SynthesisConfig};
use synth_parquet::{BatchWriter, PartitionRoots, WriteMetrics};
use synth_sampler::{LedgerSampler, ProcessorSampler};
use tracing::{info, warn};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every batch was written.
    Completed,
    /// The user stopped the run at a pause. Batches already written are
    /// complete and stay in place.
    Cancelled,
}

/// Metrics from one batch.
#[derive(Debug, Clone, Default)]
pub struct BatchMetrics {
    pub index: u64,
    pub applied: AppliedAnomalies,
    pub link_duration: Duration,
    pub apply_duration: Duration,
    pub write: WriteMetrics,
    pub total_duration: Duration,
}

impl BatchMetrics {
    /// Calculate processor rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.write.processor_rows as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub batches_written: u64,
    pub total_batches: u64,
    pub processor_rows: u64,
    pub ledger_rows: u64,
    pub modifications_applied: u64,
    pub deletions_applied: u64,
    /// Time spent loading samplers and drawing the plan.
    pub setup_duration: Duration,
    pub total_duration: Duration,
    pub batches: Vec<BatchMetrics>,
}

impl RunSummary {
    fn new(total_batches: u64) -> Self {
        Self {
            outcome: RunOutcome::Completed,
            batches_written: 0,
            total_batches,
            processor_rows: 0,
            ledger_rows: 0,
            modifications_applied: 0,
            deletions_applied: 0,
            setup_duration: Duration::ZERO,
            total_duration: Duration::ZERO,
            batches: Vec::new(),
        }
    }

    fn record(&mut self, metrics: BatchMetrics) {
        self.batches_written += 1;
        self.processor_rows += metrics.write.processor_rows as u64;
        self.ledger_rows += metrics.write.ledger_rows as u64;
        self.modifications_applied += metrics.applied.modified as u64;
        self.deletions_applied += metrics.applied.deleted as u64;
        self.batches.push(metrics);
    }

    /// Calculate processor rows per second over the whole run.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.processor_rows as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        let status = match self.outcome {
            RunOutcome::Completed => "Synthesis completed",
            RunOutcome::Cancelled => "Synthesis stopped early",
        };
        format!(
            "{status}: {}/{} batches, {} processor rows, {} ledger rows, \
             {} modifications, {} deletions in {:?} ({:.0} rows/sec)",
            self.batches_written,
            self.total_batches,
            self.processor_rows,
            self.ledger_rows,
            self.modifications_applied,
            self.deletions_applied,
            self.total_duration,
            self.rows_per_second()
        )
    }
}

/// Sequences validation, reset, sampling, anomaly injection and writing.
pub struct Orchestrator<G> {
    config: SynthesisConfig,
    gate: G,
}

impl<G: BatchGate> Orchestrator<G> {
    pub fn new(config: SynthesisConfig, gate: G) -> Self {
        Self { config, gate }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }

    /// Run every batch.
    ///
    /// The configuration is validated before anything on disk is touched.
    /// Both partition roots are then cleared and recreated, so a run always
    /// replaces the previous one.
    pub async fn run(&mut self) -> Result<RunSummary, PipelineError> {
        let start_time = Instant::now();
        let config = &self.config;
        let layout = &config.layout;

        let anomalies = config.validate()?;
        let total_batches = config.batch_count();
        info!(
            "Synthesizing {} rows in {} batches of up to {} ({} anomalies: {} deletions, {} modifications, seed={})",
            config.total_rows,
            total_batches,
            config.batch_size,
            anomalies,
            config.deletions,
            anomalies - config.deletions,
            config.seed
        );

        let roots = PartitionRoots::new(layout.processor_root.clone(), layout.ledger_root.clone());
        roots.reset()?;

        let processor_model = layout.processor_model();
        let ledger_model = layout.ledger_model();
        let missing: Vec<_> = [&processor_model, &ledger_model]
            .into_iter()
            .filter(|path| !path.exists())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(SynthError::MissingArtifact { paths: missing }.into());
        }

        let processor = ProcessorSampler::from_file(
            &processor_model,
            derive_seed(config.seed, SeedStream::ProcessorSampler),
        )?;
        let ledger = LedgerSampler::from_file(
            &ledger_model,
            derive_seed(config.seed, SeedStream::LedgerSampler),
        )?;
        info!(
            "Loaded sampler profiles from {}",
            layout.models_dir.display()
        );

        let mut plan_rng = StdRng::seed_from_u64(derive_seed(config.seed, SeedStream::Plan));
        let plan = AnomalyPlan::plan(
            config.total_rows,
            config.anomaly_rate,
            config.deletions,
            &mut plan_rng,
        )?;

        let mut linker = BatchLinker::new(processor, ledger);
        let writer = BatchWriter::new(roots);
        let mut summary = RunSummary::new(total_batches);
        summary.setup_duration = start_time.elapsed();

        for bounds in config.batches() {
            let batch_start = Instant::now();

            let linked = linker.link(bounds)?;
            let link_duration = batch_start.elapsed();

            let apply_start = Instant::now();
            let (batch, applied) =
                AnomalyApplier::for_batch(config.seed, bounds.index).apply(&plan, linked)?;
            let apply_duration = apply_start.elapsed();

            let write = writer.write(&batch)?;
            drop(batch);

            let metrics = BatchMetrics {
                index: bounds.index,
                applied,
                link_duration,
                apply_duration,
                write,
                total_duration: batch_start.elapsed(),
            };
            info!(
                "Batch {}/{} written: {} processor rows, {} ledger rows, {} modified, {} deleted in {:?} ({:.0} rows/sec)",
                bounds.index + 1,
                total_batches,
                metrics.write.processor_rows,
                metrics.write.ledger_rows,
                applied.modified,
                applied.deleted,
                metrics.total_duration,
                metrics.rows_per_second()
            );
            summary.record(metrics);

            let completed = bounds.index + 1;
            if completed < total_batches
                && self.gate.confirm(completed, total_batches).await? == GateDecision::Stop
            {
                warn!(
                    "Stopped by user after {}/{} batches; written batches are kept",
                    completed, total_batches
                );
                summary.outcome = RunOutcome::Cancelled;
                break;
            }
        }

        summary.total_duration = start_time.elapsed();
        info!("{}", summary.summary());
        Ok(summary)
    }
}
