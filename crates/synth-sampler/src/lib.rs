//! Row samplers for the processor and ledger streams.
//!
//! A sampler turns a loaded [`profile`] into rows on demand. The profile is
//! the on-disk artifact standing in for a trained generative model: a YAML
//! file that names a generator for every column of the stream.
//!
//! # Architecture
//!
//! ```text
//! processor_model.yaml      ledger_model.yaml
//!        │                          │
//!        ▼                          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ ProcessorSampler │     │  LedgerSampler   │
//! │  - profile       │     │  - profile       │
//! │  - rng (StdRng)  │     │  - rng (StdRng)  │
//! │  - index         │     │  - index         │
//! └────────┬─────────┘     └────────┬─────────┘
//!          │ sample(n)              │ sample(n)
//!          ▼                        ▼
//!   Vec<ProcessorRecord>      Vec<LedgerDraft>
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_sampler::{ProcessorProfile, ProcessorSampler, RowSampler};
//!
//! let profile = ProcessorProfile::from_yaml(r#"
//! version: 1
//! external_id:
//!   type: pattern
//!   pattern: "ch_{alnum:24}"
//! amount:
//!   type: decimal_range
//!   min: "50.0000"
//!   max: "5000.0000"
//! currency:
//!   type: one_of
//!   values: [USD]
//! created_at:
//!   type: timestamp_range
//!   start: "2024-01-01T00:00:00Z"
//!   end: "2024-12-31T23:59:59Z"
//! "#).unwrap();
//!
//! let mut sampler = ProcessorSampler::new(profile, 42).unwrap();
//! let rows = sampler.sample(3).unwrap();
//! assert_eq!(rows.len(), 3);
//! ```
//!
//! # Generators
//!
//! - `pattern` - strings with `{index}`, `{rand:N}`, `{alnum:N}` and, in ledger
//!   memos, `{external_id}` placeholders
//! - `one_of` - uniform pick from a list
//! - `static` - a fixed value
//! - `decimal_range` - uniform decimal at scale 4, drawn on the integer mantissa
//! - `int_range` - uniform integer
//! - `timestamp_range` - uniform UTC timestamp with second granularity

mod error;
pub mod generators;
pub mod profile;
pub mod sampler;

// Re-exports for convenience
pub use error::SamplerError;
pub use profile::{
    DecimalGenerator, IntGenerator, LagRange, LedgerProfile, ProcessorProfile,
    TextGenerator, TimestampGenerator,
};
pub use sampler::{LedgerSampler, ProcessorSampler, RowSampler};
