//! CLI argument definitions.

use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use synth_core::{StorageLayout, SynthesisConfig, DEFAULT_BASE_PATH};

/// Run parameters shared by `generate` and `verify`.
#[derive(Args, Clone, Debug)]
pub struct CommonSynthArgs {
    /// Base storage path holding models/, processor_bulk/ and ledger_bulk/
    #[arg(long, env = "DATA_PATH_RAW", default_value = DEFAULT_BASE_PATH)]
    pub base_path: PathBuf,

    /// Number of rows per stream
    #[arg(long, default_value = "1500000")]
    pub row_count: u64,

    /// Rows generated and written per batch
    #[arg(long, default_value = "150000")]
    pub batch_size: usize,

    /// Fraction of rows that become anomalies (exact decimal, e.g. 0.001)
    #[arg(long, default_value = "0.001")]
    pub anomaly_rate: Decimal,

    /// How many of the anomalies are rows deleted from the ledger
    #[arg(long, default_value = "500")]
    pub deletions: u64,
}

impl CommonSynthArgs {
    pub fn to_config(&self, seed: u64) -> SynthesisConfig {
        SynthesisConfig {
            total_rows: self.row_count,
            batch_size: self.batch_size,
            anomaly_rate: self.anomaly_rate,
            deletions: self.deletions,
            seed,
            layout: StorageLayout::from_base(&self.base_path),
        }
    }
}

/// Arguments of `generate`.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonSynthArgs,

    /// Random seed for the plan, the samplers and the modification signs
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Pause for confirmation after every batch except the last
    #[arg(long)]
    pub interactive: bool,
}

/// Arguments of `verify`.
#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub common: CommonSynthArgs,
}

/// Arguments of `models init`.
#[derive(Args, Clone, Debug)]
pub struct ModelsInitArgs {
    /// Base storage path; profiles are written to <base>/models
    #[arg(long, env = "DATA_PATH_RAW", default_value = DEFAULT_BASE_PATH)]
    pub base_path: PathBuf,

    /// Overwrite existing profiles
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        generate: GenerateArgs,
    }

    #[test]
    fn test_defaults_match_reference_run() {
        let cli = TestCli::parse_from(["recon-synth", "--base-path", "/data"]);
        let config = cli.generate.common.to_config(cli.generate.seed);

        assert_eq!(config.total_rows, 1_500_000);
        assert_eq!(config.batch_size, 150_000);
        assert_eq!(config.anomaly_rate, Decimal::new(1, 3));
        assert_eq!(config.deletions, 500);
        assert_eq!(config.seed, 42);
        assert!(!cli.generate.interactive);
        assert_eq!(config.layout.processor_root, Path::new("/data/processor_bulk"));
    }

    #[test]
    fn test_parse_overrides() {
        let cli = TestCli::parse_from([
            "recon-synth",
            "--base-path",
            "/tmp/x",
            "--row-count",
            "10",
            "--batch-size",
            "5",
            "--anomaly-rate",
            "0.2",
            "--deletions",
            "1",
            "--seed",
            "7",
            "--interactive",
        ]);
        let config = cli.generate.common.to_config(cli.generate.seed);

        assert_eq!(config.validate().unwrap(), 2);
        assert_eq!(config.seed, 7);
        assert!(cli.generate.interactive);
    }

    #[test]
    fn test_rejects_malformed_rate() {
        assert!(TestCli::try_parse_from(["recon-synth", "--anomaly-rate", "abc"]).is_err());
    }
}
