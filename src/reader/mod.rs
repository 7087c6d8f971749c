//! # WBTS Reader Module
//!
//! Reads dataset files written by [`crate::writer`] (and plain Parquet files
//! with a `DATETIME` column) back into [`Dataset`](crate::dataset::Dataset)s.
//!
//! ## Features
//!
//! - **Metadata Access**: global attributes and depth coordinates from the footer
//! - **Streaming Iteration**: record batches on demand
//! - **Lenient Decoding**: integer columns widen to Float64, nulls become NaN
//!
//! ## Example
//!
//! ```rust,no_run
//! use wbts::reader::DatasetReader;
//!
//! let reader = DatasetReader::open("Merged/WBTS_2001_04_CTD_LADCP.parquet")?;
//! println!("Format version: {}", reader.metadata().format_version);
//!
//! let dataset = reader.read_dataset()?;
//! println!("{} casts", dataset.num_times());
//! # Ok::<(), wbts::reader::ReaderError>(())
//! ```

mod batches;
mod config;
mod dataset;
mod error;
mod metadata;
mod open;
mod summary;
mod utils;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

pub use batches::RecordBatchIterator;
pub use config::ReaderConfig;
pub use dataset::read_dataset;
pub use error::ReaderError;
pub use metadata::FileMetadata;
pub use summary::{FileSummary, VariableSummary};

/// Reader for WBTS dataset files
pub struct DatasetReader {
    path: PathBuf,
    config: ReaderConfig,
    file_metadata: FileMetadata,
}

impl DatasetReader {
    /// Path of the opened file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
