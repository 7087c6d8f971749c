use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::Schema;
use parquet::file::reader::{FileReader, SerializedFileReader};

use crate::dataset::{Attributes, Coordinate};
use crate::schema::{KEY_COORDINATES, KEY_FORMAT_VERSION, KEY_GLOBAL_ATTRIBUTES};

use super::{DatasetReader, ReaderError};

/// Metadata extracted from a dataset file footer
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Format version string
    pub format_version: String,
    /// Total number of rows (time points) in the file
    pub total_rows: i64,
    /// Number of row groups
    pub num_row_groups: usize,
    /// Schema of the Parquet file
    pub schema: Arc<Schema>,
    /// Raw key-value metadata from Parquet footer
    pub key_value_metadata: HashMap<String, String>,
    /// Global attributes, in stored order
    pub global_attributes: Attributes,
    /// Non-time coordinates
    pub coordinates: Vec<Coordinate>,
}

impl DatasetReader {
    /// Extract metadata from a Parquet reader
    pub(super) fn extract_file_metadata<R: parquet::file::reader::ChunkReader + 'static>(
        reader: &SerializedFileReader<R>,
    ) -> Result<FileMetadata, ReaderError> {
        let parquet_metadata = reader.metadata();
        let file_meta = parquet_metadata.file_metadata();
        let schema = parquet::arrow::parquet_to_arrow_schema(
            file_meta.schema_descr(),
            file_meta.key_value_metadata(),
        )?;

        // Extract key-value metadata
        let mut kv_metadata = HashMap::new();
        if let Some(kv_list) = file_meta.key_value_metadata() {
            for kv in kv_list {
                if let Some(value) = &kv.value {
                    kv_metadata.insert(kv.key.clone(), value.clone());
                }
            }
        }

        let format_version = kv_metadata
            .get(KEY_FORMAT_VERSION)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let global_attributes = match kv_metadata.get(KEY_GLOBAL_ATTRIBUTES) {
            Some(json) => serde_json::from_str(json).map_err(|e| {
                ReaderError::MetadataError(format!("{}: {}", KEY_GLOBAL_ATTRIBUTES, e))
            })?,
            None => Attributes::new(),
        };
        let coordinates = match kv_metadata.get(KEY_COORDINATES) {
            Some(json) => serde_json::from_str(json).map_err(|e| {
                ReaderError::MetadataError(format!("{}: {}", KEY_COORDINATES, e))
            })?,
            None => Vec::new(),
        };

        let total_rows: i64 = (0..parquet_metadata.num_row_groups())
            .map(|i| parquet_metadata.row_group(i).num_rows())
            .sum();

        Ok(FileMetadata {
            format_version,
            total_rows,
            num_row_groups: parquet_metadata.num_row_groups(),
            schema: Arc::new(schema),
            key_value_metadata: kv_metadata,
            global_attributes,
            coordinates,
        })
    }

    /// Get file metadata
    pub fn metadata(&self) -> &FileMetadata {
        &self.file_metadata
    }

    /// Get the total number of time points (rows) in the file
    pub fn total_times(&self) -> i64 {
        self.file_metadata.total_rows
    }

    /// Get the Arrow schema
    pub fn schema(&self) -> Arc<Schema> {
        Arc::clone(&self.file_metadata.schema)
    }
}
