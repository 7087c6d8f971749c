//! # WBTS Writer Module
//!
//! Writes [`Dataset`](crate::dataset::Dataset)s to Parquet.
//!
//! ## Design Principles
//!
//! 1. **Self-Contained Files**: global attributes and depth coordinates are
//!    embedded in the Parquet footer's key_value_metadata, variable attributes
//!    in the Arrow field metadata.
//!
//! 2. **Atomic Replacement**: [`write_dataset_file`] writes through a temporary
//!    sibling file, so rebuilding an archive never leaves a half-written file.
//!
//! 3. **Configurable Compression**: Supports ZSTD (default), Snappy, and uncompressed.

mod config;
mod error;
mod stats;
mod writer_impl;

#[cfg(test)]
mod tests;

pub use config::{CompressionType, WriterConfig};
pub use error::WriterError;
pub use stats::WriterStats;
pub use writer_impl::{write_dataset, write_dataset_file, DatasetWriter};
