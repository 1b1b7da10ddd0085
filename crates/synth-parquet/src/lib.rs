//! Partitioned Parquet storage for the processor and ledger streams.
//!
//! Each stream has its own partition root holding one file per batch:
//!
//! ```text
//! processor_bulk/part-0.parquet   ledger_bulk/part-0.parquet
//! processor_bulk/part-1.parquet   ledger_bulk/part-1.parquet
//! ...
//! ```
//!
//! Monetary columns are `Decimal128(19, 4)` and carry the exact scale-4
//! mantissa; timestamps are microseconds in UTC. A part file only appears
//! under its final name once it has been completely written.
//!
//! # Example
//!
//! ```ignore
//! use synth_parquet::{BatchWriter, PartitionRoots};
//!
//! let roots = PartitionRoots::new("/data/processor_bulk", "/data/ledger_bulk");
//! roots.reset()?;
//! let writer = BatchWriter::new(roots);
//! let metrics = writer.write(&batch)?;
//! ```

pub mod convert;
mod error;
pub mod reader;
pub mod schema;
pub mod writer;

pub use error::StoreError;
pub use reader::{list_parts, read_ledger_part, read_processor_part, PartFile};
pub use writer::{part_file_name, BatchWriter, PartitionRoots, WriteMetrics};
