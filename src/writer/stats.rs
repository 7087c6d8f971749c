use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone)]
pub struct WriterStats {
    /// Number of `DATETIME` rows written
    pub times_written: usize,
    /// Number of data variables per row
    pub variables_written: usize,
    /// Number of Parquet row groups written
    pub row_groups_written: usize,
    /// Total file size in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} time points ({} variables) in {} row groups",
            self.times_written, self.variables_written, self.row_groups_written
        )
    }
}
