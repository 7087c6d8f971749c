//! # Merge Engine
//!
//! The two merge stages of the pipeline:
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | [`merge_cruise`] | `CTD/*.parquet`, `ladcp_velfiles/*.parquet` | `Merged/WBTS_YYYY_MM_CTD_LADCP.parquet` |
//! | [`merge_years`] | `Merged/*.parquet` | `Merged/WBTS_all_years_CTD_LADCP.parquet` |
//!
//! Every input file is renamed and unit-normalized with the project
//! vocabulary when loaded. Unreadable files are logged, skipped and reported
//! in the merge result.
//!
//! ## Failure Modes
//!
//! - [`MergeError::NoInputData`]: a cruise has no loadable casts
//! - [`MergeError::CoordinateMismatch`]: casts and velocities cannot share a
//!   time coordinate; fatal for that cruise only
//! - [`MergeError::NoValidDatasets`]: nothing to put in the archive

mod archive;
mod cruise;
mod error;
mod load;


pub use archive::{
    merge_years, merge_years_with, ArchiveMerge, ArchiveOptions, ARCHIVE_OUTPUT_FILE,
    MERGED_DIR_NAME,
};
pub use cruise::{cruise_output_name, merge_all_cruises, merge_cruise, CruiseMerge};
pub use error::MergeError;
pub use load::SkippedFile;
