//! Batch writer for the two partition roots.

use crate::convert::{ledger_batch, processor_batch};
use crate::error::StoreError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use synth_core::Batch;
use tracing::{debug, info, warn};

/// File name of the part written for batch `index`.
pub fn part_file_name(index: u64) -> String {
    format!("part-{index}.parquet")
}

/// The two output directories, one per stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionRoots {
    pub processor: PathBuf,
    pub ledger: PathBuf,
}

impl PartitionRoots {
    pub fn new(processor: impl Into<PathBuf>, ledger: impl Into<PathBuf>) -> Self {
        Self {
            processor: processor.into(),
            ledger: ledger.into(),
        }
    }

    /// Delete both roots with everything in them and create them empty.
    ///
    /// This is destructive by contract: a run always starts from empty roots
    /// so that re-running never mixes parts from two runs. Callers must only
    /// reset after the run configuration has been validated.
    pub fn reset(&self) -> Result<(), StoreError> {
        for root in [&self.processor, &self.ledger] {
            if root.exists() {
                fs::remove_dir_all(root).map_err(StoreError::io(root))?;
                info!("Removed existing directory: {}", root.display());
            }
            fs::create_dir_all(root).map_err(StoreError::io(root))?;
            info!("Created directory: {}", root.display());
        }
        Ok(())
    }
}

/// Metrics from writing one batch.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    pub processor_rows: usize,
    pub ledger_rows: usize,
    /// Combined size of both part files.
    pub bytes_written: u64,
    pub duration: Duration,
}

impl WriteMetrics {
    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.bytes_written as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes each batch as one Parquet part per stream.
pub struct BatchWriter {
    roots: PartitionRoots,
    properties: WriterProperties,
}

impl BatchWriter {
    /// Create a writer with Snappy-compressed output.
    pub fn new(roots: PartitionRoots) -> Self {
        let properties = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        Self { roots, properties }
    }

    /// Override the Parquet writer properties.
    pub fn with_properties(mut self, properties: WriterProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn roots(&self) -> &PartitionRoots {
        &self.roots
    }

    /// Write both streams of a batch to `part-<index>.parquet` in their roots.
    ///
    /// Both parts are staged before either is renamed into place. On error
    /// neither part is left under its final name and staging files are
    /// removed.
    pub fn write(&self, batch: &Batch) -> Result<WriteMetrics, StoreError> {
        let start_time = Instant::now();
        let name = part_file_name(batch.index());
        let processor_records = processor_batch(&batch.processor)?;
        let ledger_records = ledger_batch(&batch.ledger)?;

        let processor_path = self.roots.processor.join(&name);
        let ledger_path = self.roots.ledger.join(&name);

        let processor_staging = self.stage_part(&processor_path, &processor_records)?;
        let ledger_staging = match self.stage_part(&ledger_path, &ledger_records) {
            Ok(staging) => staging,
            Err(e) => {
                discard(&processor_staging);
                return Err(e);
            }
        };

        if let Err(source) = fs::rename(&processor_staging, &processor_path) {
            discard(&processor_staging);
            discard(&ledger_staging);
            return Err(StoreError::io(&processor_path)(source));
        }
        if let Err(source) = fs::rename(&ledger_staging, &ledger_path) {
            discard(&processor_path);
            discard(&ledger_staging);
            return Err(StoreError::io(&ledger_path)(source));
        }

        let processor_bytes = fs::metadata(&processor_path)
            .map_err(StoreError::io(&processor_path))?
            .len();
        let ledger_bytes = fs::metadata(&ledger_path)
            .map_err(StoreError::io(&ledger_path))?
            .len();

        let metrics = WriteMetrics {
            processor_rows: batch.processor.len(),
            ledger_rows: batch.ledger.len(),
            bytes_written: processor_bytes + ledger_bytes,
            duration: start_time.elapsed(),
        };
        debug!(
            "Wrote {} ({} processor rows, {} ledger rows, {} bytes) in {:?}",
            name, metrics.processor_rows, metrics.ledger_rows, metrics.bytes_written, metrics.duration
        );
        Ok(metrics)
    }

    /// Write a part under its staging name and return that name.
    fn stage_part(&self, path: &Path, records: &RecordBatch) -> Result<PathBuf, StoreError> {
        let staging = path.with_extension("parquet.tmp");
        match self.write_file(&staging, records) {
            Ok(()) => Ok(staging),
            Err(e) => {
                discard(&staging);
                Err(e)
            }
        }
    }

    fn write_file(&self, path: &Path, records: &RecordBatch) -> Result<(), StoreError> {
        let file = File::create(path).map_err(StoreError::io(path))?;
        let mut writer = ArrowWriter::try_new(file, records.schema(), Some(self.properties.clone()))?;
        writer.write(records)?;
        writer.close()?;
        Ok(())
    }
}

/// Best-effort removal of a file left by a failed write.
fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
