//! Command-line interface for recon-synth
//!
//! # Usage Examples
//!
//! ## Sampler profiles
//! ```bash
//! # Write the default processor and ledger profiles
//! recon-synth models init --base-path /mnt/ssd_raw
//! ```
//!
//! ## Generation
//! ```bash
//! # Reference run: 1.5M rows, 10 batches, 1500 anomalies of which 500 deletions
//! recon-synth generate
//!
//! # Small run with a pause after every batch
//! recon-synth generate --row-count 10 --batch-size 5 \
//!   --anomaly-rate 0.2 --deletions 1 --interactive
//! ```
//!
//! ## Verification
//! ```bash
//! recon-synth verify --row-count 10 --batch-size 5 --anomaly-rate 0.2 --deletions 1
//! ```
//!
//! The base path defaults to `$DATA_PATH_RAW`, then `/mnt/ssd_raw`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use recon_synth::args::{GenerateArgs, ModelsInitArgs, VerifyArgs};
use recon_synth::{
    init_models, AutoContinue, BatchGate, InteractiveGate, Orchestrator, RunOutcome, StopSignal,
};
use synth_core::{StorageLayout, SynthesisConfig};
use synth_parquet::PartitionRoots;
use synth_verify::{ExpectedCounts, PartitionVerifier};

#[derive(Parser)]
#[command(name = "recon-synth")]
#[command(about = "Generate correlated processor and ledger datasets with planted reconciliation anomalies")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate both streams batch by batch
    Generate(GenerateArgs),

    /// Re-read both partition roots and check the planted anomalies
    Verify(VerifyArgs),

    /// Manage sampler profiles
    Models {
        #[command(subcommand)]
        command: ModelsCommand,
    },
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// Write the default processor and ledger profiles
    Init(ModelsInitArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let config = args.common.to_config(args.seed);
            if args.interactive {
                let stop = StopSignal::new();
                let _ctrl_c = stop.on_ctrl_c();
                let gate = InteractiveGate::stdin(stop)
                    .context("Failed to start reading confirmations from stdin")?;
                run_generate(config, gate).await
            } else {
                run_generate(config, AutoContinue).await
            }
        }
        Commands::Verify(args) => run_verify(args.common.to_config(0)),
        Commands::Models {
            command: ModelsCommand::Init(args),
        } => {
            let layout = StorageLayout::from_base(&args.base_path);
            let result = init_models(&layout, args.force).with_context(|| {
                format!(
                    "Failed to write sampler profiles to {}",
                    layout.models_dir.display()
                )
            })?;
            tracing::info!(
                "Profiles ready: {} written, {} kept",
                result.written.len(),
                result.kept.len()
            );
            Ok(())
        }
    }
}

/// Run generate command
async fn run_generate<G: BatchGate>(config: SynthesisConfig, gate: G) -> anyhow::Result<()> {
    let layout = config.layout.clone();
    let summary = Orchestrator::new(config, gate)
        .run()
        .await
        .with_context(|| {
            format!(
                "Synthesis into {} and {} failed",
                layout.processor_root.display(),
                layout.ledger_root.display()
            )
        })?;

    match summary.outcome {
        RunOutcome::Completed => tracing::info!("Generate completed successfully"),
        RunOutcome::Cancelled => tracing::warn!(
            "Generate stopped after {}/{} batches",
            summary.batches_written,
            summary.total_batches
        ),
    }
    Ok(())
}

/// Run verify command to reconcile the written partitions
fn run_verify(config: SynthesisConfig) -> anyhow::Result<()> {
    let expected = ExpectedCounts::from_config(&config).context("Invalid verify configuration")?;
    let roots = PartitionRoots::new(
        config.layout.processor_root.clone(),
        config.layout.ledger_root.clone(),
    );

    let report = PartitionVerifier::new(roots)
        .verify()
        .context("Failed to read partitions")?;

    if report.conforms_to(&expected) {
        tracing::info!("{}", report.summary(&expected));
        Ok(())
    } else {
        tracing::error!("{}", report.summary(&expected));
        for mismatch in &report.mismatches {
            tracing::error!(
                "Batch {} row '{}': {} expected {}, got {}",
                mismatch.batch,
                mismatch.external_id,
                mismatch.field,
                mismatch.expected,
                mismatch.actual
            );
        }
        report.check(&expected)?;
        Ok(())
    }
}
