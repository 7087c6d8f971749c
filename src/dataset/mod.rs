//! # WBTS Dataset Model
//!
//! In-memory grid datasets shared by every merge stage.
//!
//! A [`Dataset`] has a single `DATETIME` dimension, any number of depth-like
//! coordinates (`DEPTH`, `DEPTH_LADCP`), and variables that are either per-time
//! scalars or profiles along one depth coordinate:
//!
//! | Shape | Example | Storage |
//! |-------|---------|---------|
//! | (DATETIME) | LATITUDE, CAST | `Values::Float` |
//! | (DATETIME) | GC_STRING | `Values::Text` |
//! | (DATETIME, DEPTH) | TEMP, PSAL | `Values::Float`, row-major |
//!
//! Missing values are NaN (numbers) or empty strings (text). They only appear
//! where an outer join or an unmatched alignment has nothing to offer.
//!
//! ## Operations
//!
//! - [`concat_time`]: concatenate along `DATETIME`, outer-joining depth grids
//! - [`reindex_nearest`]: nearest-time reindexing with tolerance and tie policy
//! - [`reindex_by_cast`]: reindexing by equal cast numbers
//!
//! ```rust
//! use wbts::dataset::{concat_time, Coordinate, Dataset, Variable};
//!
//! let mut a = Dataset::new(vec![0]);
//! a.add_coordinate(Coordinate::new("DEPTH", vec![0.0, 10.0]));
//! a.add_variable(Variable::profile("TEMP", "DEPTH", vec![20.0, 19.0]));
//!
//! let mut b = Dataset::new(vec![3600]);
//! b.add_coordinate(Coordinate::new("DEPTH", vec![10.0, 20.0]));
//! b.add_variable(Variable::profile("TEMP", "DEPTH", vec![18.5, 17.0]));
//!
//! let merged = concat_time(&[a, b])?;
//! assert_eq!(merged.coordinate("DEPTH").unwrap().values, vec![0.0, 10.0, 20.0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod concat;
mod error;
mod reindex;
mod types;

#[cfg(test)]
mod tests;

pub use concat::concat_time;
pub use error::DatasetError;
pub use reindex::{
    nearest_rows, reindex_by_cast, reindex_nearest, AlignmentPolicy, AlignmentReport, TieBreak,
    TimeMatching, DEFAULT_MATCH_TOLERANCE_SECONDS,
};
pub use types::{
    datetime_to_seconds, seconds_to_datetime, AttrValue, Attributes, Coordinate, Dataset,
    TimeCoordinate, Values, Variable,
};
