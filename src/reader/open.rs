use std::fs::File;
use std::path::Path;

use parquet::file::reader::SerializedFileReader;

use super::{DatasetReader, ReaderConfig, ReaderError};

impl DatasetReader {
    /// Open a dataset file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open a dataset file with custom configuration
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ReaderConfig,
    ) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        if path.is_dir() {
            return Err(ReaderError::InvalidFormat(format!(
                "expected a Parquet file, found directory {}",
                path.display()
            )));
        }

        let file = File::open(path)?;
        let parquet_reader = SerializedFileReader::new(file)?;
        let file_metadata = Self::extract_file_metadata(&parquet_reader)?;

        Ok(Self {
            path: path.to_path_buf(),
            config,
            file_metadata,
        })
    }
}
