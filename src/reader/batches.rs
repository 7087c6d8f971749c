use std::fs::File;

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::{DatasetReader, ReaderError};

/// Streaming iterator over record batches
///
/// Reads batches on demand; memory usage is bounded by `batch_size` rows.
pub struct RecordBatchIterator {
    inner: Box<dyn Iterator<Item = Result<RecordBatch, arrow::error::ArrowError>> + Send>,
}

impl RecordBatchIterator {
    pub(crate) fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<RecordBatch, arrow::error::ArrowError>> + Send + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }
}

impl Iterator for RecordBatchIterator {
    type Item = Result<RecordBatch, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|r| r.map_err(ReaderError::from))
    }
}

impl DatasetReader {
    /// Returns a streaming iterator over the record batches of the file
    ///
    /// # Example
    /// ```rust,no_run
    /// use wbts::reader::DatasetReader;
    ///
    /// let reader = DatasetReader::open("WBTS_2001_04_CTD_LADCP.parquet")?;
    /// for batch_result in reader.iter_batches()? {
    ///     let batch = batch_result?;
    ///     println!("Processing batch with {} casts", batch.num_rows());
    /// }
    /// # Ok::<(), wbts::reader::ReaderError>(())
    /// ```
    pub fn iter_batches(&self) -> Result<RecordBatchIterator, ReaderError> {
        let file = File::open(&self.path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(self.config.batch_size);
        let reader = builder.build()?;
        Ok(RecordBatchIterator::new(reader))
    }

    /// Read all record batches from the file (eager, collects all batches)
    pub fn read_all_batches(&self) -> Result<Vec<RecordBatch>, ReaderError> {
        self.iter_batches()?.collect()
    }
}
