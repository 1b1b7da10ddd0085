//! Reading partition files back.

use crate::convert::{ledger_rows, processor_rows};
use crate::error::StoreError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use synth_core::{LedgerRecord, ProcessorRecord};

/// A part file found in a partition root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartFile {
    pub index: u64,
    pub path: PathBuf,
}

/// Batch index encoded in a part file name, if it is one.
pub fn parse_part_index(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix("part-")?
        .strip_suffix(".parquet")?
        .parse()
        .ok()
}

/// All complete part files in a root, ordered by batch index.
///
/// Staging files and anything else that is not `part-<index>.parquet` are
/// ignored.
pub fn list_parts(root: &Path) -> Result<Vec<PartFile>, StoreError> {
    let mut parts = Vec::new();
    for entry in fs::read_dir(root).map_err(StoreError::io(root))? {
        let entry = entry.map_err(StoreError::io(root))?;
        let index = entry.file_name().to_str().and_then(parse_part_index);
        if let Some(index) = index {
            parts.push(PartFile {
                index,
                path: entry.path(),
            });
        }
    }
    parts.sort_by_key(|p| p.index);
    Ok(parts)
}

/// Read every processor row of one part file.
pub fn read_processor_part(path: &Path) -> Result<Vec<ProcessorRecord>, StoreError> {
    let mut rows = Vec::new();
    for batch in read_record_batches(path)? {
        rows.extend(processor_rows(&batch)?);
    }
    Ok(rows)
}

/// Read every ledger row of one part file.
pub fn read_ledger_part(path: &Path) -> Result<Vec<LedgerRecord>, StoreError> {
    let mut rows = Vec::new();
    for batch in read_record_batches(path)? {
        rows.extend(ledger_rows(&batch)?);
    }
    Ok(rows)
}

fn read_record_batches(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    let file = File::open(path).map_err(StoreError::io(path))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    Ok(reader.collect::<Result<Vec<_>, _>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_part_index() {
        assert_eq!(parse_part_index("part-0.parquet"), Some(0));
        assert_eq!(parse_part_index("part-42.parquet"), Some(42));
        assert_eq!(parse_part_index("part-3.parquet.tmp"), None);
        assert_eq!(parse_part_index("part-x.parquet"), None);
        assert_eq!(parse_part_index("other.parquet"), None);
    }

    #[test]
    fn test_list_parts_orders_numerically() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["part-10.parquet", "part-2.parquet", "part-1.parquet.tmp", "notes.txt"] {
            std::fs::write(temp_dir.path().join(name), b"").unwrap();
        }

        let parts = list_parts(temp_dir.path()).unwrap();
        let indices: Vec<_> = parts.iter().map(|p| p.index).collect();

        assert_eq!(indices, vec![2, 10]);
    }

    #[test]
    fn test_list_parts_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let err = list_parts(&temp_dir.path().join("absent")).unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_read_non_parquet_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("part-0.parquet");
        std::fs::write(&path, b"not parquet").unwrap();

        assert!(matches!(
            read_processor_part(&path),
            Err(StoreError::Parquet(_))
        ));
    }
}
