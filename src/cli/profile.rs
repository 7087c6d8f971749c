//! Output profiles for common use cases.
//!
//! Profiles provide sensible defaults for compression and row grouping,
//! hiding low-level Parquet settings from end users.

use std::fmt;

use wbts::writer::{CompressionType, WriterConfig};

/// Output profiles for merged files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Prioritize speed over file size.
    ///
    /// - Compression: Snappy
    /// - Row group size: 4,096 time points
    Fast,

    /// Balance between speed and file size (default).
    ///
    /// - Compression: ZSTD level 9
    /// - Row group size: 8,192 time points
    #[default]
    Balanced,

    /// Smallest files, slower writes. Suited to the multi-year archive.
    ///
    /// - Compression: ZSTD level 22
    /// - Row group size: 65,536 time points
    MaxCompression,
}

impl Profile {
    /// Writer configuration of this profile, with an optional ZSTD level
    /// override
    pub fn writer_config(&self, compression_level: Option<i32>) -> WriterConfig {
        let mut config = match self {
            Profile::Fast => WriterConfig::fast_write(),
            Profile::Balanced => WriterConfig::balanced(),
            Profile::MaxCompression => WriterConfig::max_compression(),
        };
        if let Some(level) = compression_level {
            config.compression = CompressionType::Zstd(level);
        }
        config
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Fast => write!(f, "fast"),
            Profile::Balanced => write!(f, "balanced"),
            Profile::MaxCompression => write!(f, "max-compression"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let balanced = Profile::default();
        assert_eq!(balanced, Profile::Balanced);
        assert_eq!(balanced.writer_config(None).compression, CompressionType::Zstd(9));
        assert_eq!(balanced.writer_config(None).row_group_size, 8_192);
    }

    #[test]
    fn test_compression_override() {
        let config = Profile::Fast.writer_config(Some(5));
        assert_eq!(config.compression, CompressionType::Zstd(5));
        assert_eq!(config.row_group_size, 4_096);
        assert_eq!(Profile::MaxCompression.to_string(), "max-compression");
    }
}
