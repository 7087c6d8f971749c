use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, ListArray, StringArray, TimestampSecondArray};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::ArrowWriter;
use tempfile::NamedTempFile;

use crate::dataset::{Attributes, Dataset, Values};
use crate::schema::{
    create_dataset_schema_arc, profile_item_field, KEY_COORDINATES, KEY_FORMAT_VERSION,
    KEY_GLOBAL_ATTRIBUTES, WBTS_FORMAT_VERSION,
};

use super::config::WriterConfig;
use super::error::WriterError;
use super::stats::WriterStats;

/// Writer for WBTS dataset Parquet files.
///
/// The schema and footer metadata (global attributes, non-time coordinates)
/// are fixed by the dataset given at construction. Further datasets with the
/// same layout may be appended as extra time rows.
pub struct DatasetWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: Arc<Schema>,
    times_written: usize,
    variables: usize,
}

impl DatasetWriter<File> {
    /// Create a new writer to a file path
    pub fn new_file<P: AsRef<Path>>(
        path: P,
        dataset: &Dataset,
        config: &WriterConfig,
    ) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Self::new(file, dataset, config)
    }
}

impl<W: Write + Send> DatasetWriter<W> {
    /// Create a new writer to any Write implementation
    pub fn new(writer: W, dataset: &Dataset, config: &WriterConfig) -> Result<Self, WriterError> {
        dataset.validate()?;
        let schema = create_dataset_schema_arc(dataset)?;
        let footer = footer_metadata(dataset)?;

        let scalar_floats: Vec<&str> = dataset
            .variables
            .iter()
            .filter(|v| !v.is_profile() && matches!(v.values, Values::Float(_)))
            .map(|v| v.name.as_str())
            .collect();
        let props = config.to_writer_properties(&footer, &scalar_floats);

        let arrow_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;

        Ok(Self {
            writer: arrow_writer,
            schema,
            times_written: 0,
            variables: dataset.variables.len(),
        })
    }

    /// Append the time rows of a dataset
    pub fn write(&mut self, dataset: &Dataset) -> Result<(), WriterError> {
        dataset.validate()?;
        if dataset.num_times() == 0 {
            return Ok(());
        }
        let batch = build_record_batch(dataset, Arc::clone(&self.schema))?;
        self.writer.write(&batch)?;
        self.times_written += dataset.num_times();
        Ok(())
    }

    /// Finish writing and return statistics
    pub fn finish(self) -> Result<WriterStats, WriterError> {
        let file_metadata = self.writer.close()?;

        Ok(WriterStats {
            times_written: self.times_written,
            variables_written: self.variables,
            row_groups_written: file_metadata.row_groups.len(),
            file_size_bytes: file_metadata
                .row_groups
                .iter()
                .map(|rg| rg.total_byte_size as u64)
                .sum(),
        })
    }

    /// Finish writing and return the underlying writer
    pub fn finish_into_inner(self) -> Result<W, WriterError> {
        let inner = self.writer.into_inner()?;
        Ok(inner)
    }
}

/// Write a whole dataset to any Write implementation
pub fn write_dataset<W: Write + Send>(
    writer: W,
    dataset: &Dataset,
    config: &WriterConfig,
) -> Result<WriterStats, WriterError> {
    let mut writer = DatasetWriter::new(writer, dataset, config)?;
    writer.write(dataset)?;
    writer.finish()
}

/// Write a whole dataset to `path`, replacing any previous file.
///
/// Data goes to a temporary file in the same directory which is persisted
/// over `path` once complete. On error the temporary file is dropped, so a
/// failed write never leaves a truncated dataset behind.
pub fn write_dataset_file<P: AsRef<Path>>(
    path: P,
    dataset: &Dataset,
    config: &WriterConfig,
) -> Result<WriterStats, WriterError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp_file = NamedTempFile::new_in(parent)?;
    let mut stats = write_dataset(temp_file.reopen()?, dataset, config)?;

    temp_file.persist(path).map_err(|e| e.error)?;
    stats.file_size_bytes = fs::metadata(path)?.len();
    debug!("{} -> {}", stats, path.display());
    Ok(stats)
}

/// Footer key-value metadata of a dataset
fn footer_metadata(dataset: &Dataset) -> Result<HashMap<String, String>, WriterError> {
    check_finite_attrs("global attributes", &dataset.attrs)?;
    for coord in &dataset.coords {
        if let Some(bad) = coord.values.iter().find(|v| !v.is_finite()) {
            return Err(WriterError::InvalidData(format!(
                "coordinate {} holds non-finite value {}",
                coord.name, bad
            )));
        }
        check_finite_attrs(&coord.name, &coord.attrs)?;
    }

    let mut metadata = HashMap::new();
    metadata.insert(KEY_FORMAT_VERSION.to_string(), WBTS_FORMAT_VERSION.to_string());
    metadata.insert(
        KEY_GLOBAL_ATTRIBUTES.to_string(),
        serde_json::to_string(&dataset.attrs)?,
    );
    metadata.insert(
        KEY_COORDINATES.to_string(),
        serde_json::to_string(&dataset.coords)?,
    );
    Ok(metadata)
}

// JSON has no NaN; reject rather than silently turn it into null
fn check_finite_attrs(owner: &str, attrs: &Attributes) -> Result<(), WriterError> {
    for (key, value) in attrs.iter() {
        if value.as_f64().is_some_and(|v| !v.is_finite()) {
            return Err(WriterError::InvalidData(format!(
                "{}: attribute {} is not finite",
                owner, key
            )));
        }
    }
    Ok(())
}

/// Build the record batch of a validated dataset
fn build_record_batch(dataset: &Dataset, schema: Arc<Schema>) -> Result<RecordBatch, WriterError> {
    if schema.fields().len() != dataset.variables.len() + 1 {
        return Err(WriterError::InvalidData(
            "dataset layout differs from the writer schema".to_string(),
        ));
    }

    let n = dataset.num_times();
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(dataset.variables.len() + 1);
    columns.push(Arc::new(TimestampSecondArray::from(
        dataset.time.values.clone(),
    )));

    for variable in &dataset.variables {
        let column: ArrayRef = match (&variable.values, &variable.depth_dim) {
            (Values::Text(values), _) => {
                Arc::new(StringArray::from_iter_values(values.iter()))
            }
            (Values::Float(values), None) => Arc::new(Float64Array::from(values.clone())),
            (Values::Float(values), Some(_)) => {
                let row_len = dataset.row_len(variable)?;
                let offsets = OffsetBuffer::from_lengths(std::iter::repeat(row_len).take(n));
                Arc::new(ListArray::try_new(
                    profile_item_field(),
                    offsets,
                    Arc::new(Float64Array::from(values.clone())),
                    None,
                )?)
            }
        };
        columns.push(column);
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}
