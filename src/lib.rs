//! # WBTS - Western Boundary Time Series Merge Engine
//!
//! `wbts` merges oceanographic instrument datasets (CTD casts, LADCP velocity
//! profiles) collected across the research cruises of the Western Boundary
//! Time Series into unified, analysis-ready time-series collections.
//!
//! ## Key Features
//!
//! - **Directory Discovery**: finds CTD and LADCP directories in a raw cruise
//!   tree, skipping derived products and excluded cruises.
//!
//! - **Unit Normalization**: rewrites values and `units` attributes to the
//!   preferred units of a configurable vocabulary (`cm/s` → `m/s`, ...).
//!
//! - **Per-Cruise Merge**: concatenates the casts of a cruise along time and
//!   aligns the velocity profiles onto the cast times (nearest neighbor within
//!   a tolerance, or by cast number).
//!
//! - **Cross-Year Merge**: concatenates every per-cruise file into one
//!   multi-year archive with recomputed attributes.
//!
//! - **Self-Describing Storage**: datasets are Apache Parquet files with
//!   attributes and depth coordinates in Arrow field and footer metadata.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wbts::config::ProjectConfig;
//! use wbts::discovery::discover_cruises;
//! use wbts::merge::{merge_all_cruises, merge_years};
//! use wbts::writer::WriterConfig;
//!
//! let project = ProjectConfig::from_file(Path::new("wbts.toml"))?;
//! let inputs = discover_cruises(&project.input_dir, &project.discovery);
//!
//! for (cruise, result) in merge_all_cruises(&inputs, &project) {
//!     match result {
//!         Ok(merge) => {
//!             merge.write_to(&project.merged_dir(), &WriterConfig::default())?;
//!         }
//!         Err(e) => eprintln!("{}: {}", cruise, e),
//!     }
//! }
//!
//! let archive = merge_years(&project.output_dir, None)?;
//! archive.write(&WriterConfig::max_compression())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reading WBTS Files
//!
//! Merged files are standard Parquet files with one row per cast:
//!
//! ```python
//! # Python
//! import pyarrow.parquet as pq
//! table = pq.read_table("Merged/WBTS_all_years_CTD_LADCP.parquet")
//! ```
//!
//! ```sql
//! -- DuckDB
//! SELECT DATETIME, LATITUDE, LONGITUDE, GC_STRING
//! FROM read_parquet('Merged/WBTS_all_years_CTD_LADCP.parquet');
//! ```
//!
//! ## Architecture
//!
//! - [`dataset`]: in-memory grid datasets, concatenation and time alignment
//! - [`schema`]: Arrow schema of dataset files
//! - [`reader`] / [`writer`]: Parquet persistence
//! - [`units`]: unit vocabulary and normalization
//! - [`discovery`]: instrument directory discovery
//! - [`config`]: project configuration
//! - [`metadata`]: global attribute conventions
//! - [`merge`]: per-cruise and cross-year merges
//!
//! ## Format Specification
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | DATETIME | Timestamp(s) | Cast time (UTC) |
//! | LATITUDE, LONGITUDE | Float64 | Cast position |
//! | GC_STRING | Utf8 | Cruise identifier |
//! | TEMP, PSAL, PRES | List\<Float64\> | CTD profiles on `DEPTH` |
//! | u_water_velocity_component, v_water_velocity_component, error_velocity | List\<Float64\> | LADCP profiles on `DEPTH_LADCP` |
//!
//! The Parquet footer holds `wbts:format_version`, `wbts:global_attributes`
//! and `wbts:coordinates`.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod dataset;
pub mod discovery;
pub mod merge;
pub mod metadata;
pub mod reader;
pub mod schema;
pub mod units;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{CruiseInfo, ProjectConfig};
    pub use crate::dataset::{
        concat_time, AlignmentPolicy, AttrValue, Attributes, Coordinate, Dataset, DatasetError,
        TieBreak, TimeMatching, Values, Variable,
    };
    pub use crate::discovery::{discover_cruises, CruiseId, CruiseInputs, DiscoveryConfig};
    pub use crate::merge::{
        merge_all_cruises, merge_cruise, merge_years, merge_years_with, ArchiveMerge,
        ArchiveOptions, CruiseMerge, MergeError,
    };
    pub use crate::reader::{read_dataset, DatasetReader, FileSummary, ReaderError};
    pub use crate::units::{normalize_units, Vocabulary};
    pub use crate::writer::{write_dataset_file, CompressionType, WriterConfig, WriterStats};
}
