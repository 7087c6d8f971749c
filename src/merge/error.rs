use std::path::PathBuf;

use crate::discovery::CruiseId;

/// Errors raised by the per-cruise and cross-year merges
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A cruise has no loadable CTD data
    #[error("No input data for cruise {cruise}: {reason}")]
    NoInputData {
        /// Affected cruise
        cruise: CruiseId,
        /// What was missing
        reason: String,
    },

    /// The archive merge found nothing to merge
    #[error("No valid datasets found to merge in {}", .0.display())]
    NoValidDatasets(PathBuf),

    /// CTD and velocity records cannot be placed on a common time coordinate
    #[error("Coordinate mismatch for cruise {cruise}: {reason}")]
    CoordinateMismatch {
        /// Affected cruise
        cruise: CruiseId,
        /// What did not line up
        reason: String,
    },

    /// Dataset reconciliation error
    #[error("Dataset error: {0}")]
    Dataset(#[from] crate::dataset::DatasetError),

    /// Invalid file pattern
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Writing a merged file failed
    #[error("Writer error: {0}")]
    Writer(#[from] crate::writer::WriterError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
