//! Run configuration and validation.
//!
//! Validation is pure: it never touches the filesystem, so a rejected
//! configuration leaves every output directory exactly as it was.

use crate::batch::BatchBounds;
use crate::error::SynthError;
use crate::plan::AnomalyPlan;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the base storage path.
pub const BASE_PATH_ENV: &str = "DATA_PATH_RAW";

/// Base storage path used when [`BASE_PATH_ENV`] is not set.
pub const DEFAULT_BASE_PATH: &str = "/mnt/ssd_raw";

/// File name of the processor sampler profile inside the models directory.
pub const PROCESSOR_MODEL_FILE: &str = "processor_model.yaml";

/// File name of the ledger sampler profile inside the models directory.
pub const LEDGER_MODEL_FILE: &str = "ledger_model.yaml";

/// Where sampler profiles are read from and partitions are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub models_dir: PathBuf,
    pub processor_root: PathBuf,
    pub ledger_root: PathBuf,
}

impl StorageLayout {
    /// Standard layout under a base path:
    ///
    /// ```text
    /// <base>/models/{processor,ledger}_model.yaml
    /// <base>/processor_bulk/part-<i>.parquet
    /// <base>/ledger_bulk/part-<i>.parquet
    /// ```
    pub fn from_base(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            models_dir: base.join("models"),
            processor_root: base.join("processor_bulk"),
            ledger_root: base.join("ledger_bulk"),
        }
    }

    pub fn processor_model(&self) -> PathBuf {
        self.models_dir.join(PROCESSOR_MODEL_FILE)
    }

    pub fn ledger_model(&self) -> PathBuf {
        self.models_dir.join(LEDGER_MODEL_FILE)
    }

    fn validate(&self) -> Result<(), SynthError> {
        let overlaps = |a: &Path, b: &Path| a.starts_with(b) || b.starts_with(a);

        if overlaps(&self.processor_root, &self.ledger_root) {
            return Err(SynthError::Configuration(format!(
                "processor root {} and ledger root {} must not overlap",
                self.processor_root.display(),
                self.ledger_root.display()
            )));
        }
        for root in [&self.processor_root, &self.ledger_root] {
            if overlaps(&self.models_dir, root) {
                return Err(SynthError::Configuration(format!(
                    "models directory {} must not overlap output root {}, \
                     which is cleared at startup",
                    self.models_dir.display(),
                    root.display()
                )));
            }
        }
        Ok(())
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::from_base(DEFAULT_BASE_PATH)
    }
}

/// Parameters of one synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Rows per stream (`N`).
    pub total_rows: u64,
    /// Rows per batch (`B`).
    pub batch_size: usize,
    /// Fraction of rows that become anomalies (`r`).
    pub anomaly_rate: Decimal,
    /// How many of the anomalies are ledger deletions (`D`).
    pub deletions: u64,
    /// Seed for every RNG stream in the run.
    pub seed: u64,
    pub layout: StorageLayout,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            total_rows: 1_500_000,
            batch_size: 150_000,
            anomaly_rate: Decimal::new(1, 3),
            deletions: 500,
            seed: 42,
            layout: StorageLayout::default(),
        }
    }
}

impl SynthesisConfig {
    /// Check every run parameter. Returns the total anomaly count `K`.
    pub fn validate(&self) -> Result<u64, SynthError> {
        if self.total_rows == 0 {
            return Err(SynthError::Configuration(
                "row count must be greater than zero".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(SynthError::Configuration(
                "batch size must be greater than zero".to_string(),
            ));
        }

        let anomalies = AnomalyPlan::anomaly_count(self.total_rows, self.anomaly_rate)?;
        if self.deletions > anomalies {
            return Err(SynthError::Configuration(format!(
                "deletion count {} exceeds the {} anomalies planned for {} rows at rate {}",
                self.deletions, anomalies, self.total_rows, self.anomaly_rate
            )));
        }

        self.layout.validate()?;
        Ok(anomalies)
    }

    /// Number of batches, counting a short final batch.
    pub fn batch_count(&self) -> u64 {
        if self.batch_size == 0 {
            return 0;
        }
        self.total_rows.div_ceil(self.batch_size as u64)
    }

    /// Bounds of batch `index`, or `None` past the last batch.
    pub fn batch_bounds(&self, index: u64) -> Option<BatchBounds> {
        if index >= self.batch_count() {
            return None;
        }
        let start = index * self.batch_size as u64;
        let len = (self.total_rows - start).min(self.batch_size as u64) as usize;
        Some(BatchBounds { index, start, len })
    }

    /// All batches in order.
    pub fn batches(&self) -> impl Iterator<Item = BatchBounds> + '_ {
        (0..self.batch_count()).filter_map(|index| self.batch_bounds(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config(total_rows: u64, batch_size: usize, rate: &str, deletions: u64) -> SynthesisConfig {
        SynthesisConfig {
            total_rows,
            batch_size,
            anomaly_rate: Decimal::from_str(rate).unwrap(),
            deletions,
            seed: 42,
            layout: StorageLayout::from_base("/tmp/recon-synth-test"),
        }
    }

    #[test]
    fn test_default_matches_reference_run() {
        let config = SynthesisConfig::default();
        assert_eq!(config.validate().unwrap(), 1500);
        assert_eq!(config.batch_count(), 10);
    }

    #[test]
    fn test_validate_returns_anomaly_count() {
        assert_eq!(config(10, 5, "0.2", 1).validate().unwrap(), 2);
    }

    #[test]
    fn test_validate_rejects_excess_deletions() {
        let err = config(10, 5, "0.2", 3).validate().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        assert!(config(0, 5, "0.2", 0).validate().unwrap_err().is_configuration());
        assert!(config(10, 0, "0.2", 0).validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_validate_rejects_overlapping_roots() {
        let mut cfg = config(10, 5, "0.2", 1);
        cfg.layout.ledger_root = cfg.layout.processor_root.join("nested");
        assert!(cfg.validate().unwrap_err().is_configuration());

        let mut cfg = config(10, 5, "0.2", 1);
        cfg.layout.models_dir = cfg.layout.ledger_root.clone();
        assert!(cfg.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_batches_cover_rows_with_short_tail() {
        let cfg = config(12, 5, "0", 0);
        let batches: Vec<_> = cfg.batches().collect();

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0], BatchBounds { index: 0, start: 0, len: 5 });
        assert_eq!(batches[1], BatchBounds { index: 1, start: 5, len: 5 });
        assert_eq!(batches[2], BatchBounds { index: 2, start: 10, len: 2 });
        assert_eq!(batches[2].end(), 12);
        assert_eq!(cfg.batch_bounds(3), None);
    }

    #[test]
    fn test_layout_from_base() {
        let layout = StorageLayout::from_base("/data");
        assert_eq!(
            layout.processor_model(),
            PathBuf::from("/data/models/processor_model.yaml")
        );
        assert_eq!(layout.ledger_root, PathBuf::from("/data/ledger_bulk"));
    }
}
