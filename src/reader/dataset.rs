use std::path::Path;

use arrow::compute::concat_batches;
use log::{debug, warn};

use crate::dataset::{Dataset, TimeCoordinate, Values, Variable};
use crate::schema::DATETIME;

use super::utils::{
    column_kind, field_attributes, field_dimension, float_values, profile_values, text_values,
    time_values, ColumnKind,
};
use super::{DatasetReader, ReaderError};

impl DatasetReader {
    /// Decode the whole file into a [`Dataset`].
    ///
    /// Columns of unsupported types, and profile columns whose depth dimension
    /// is not declared in the footer, are skipped with a warning.
    pub fn read_dataset(&self) -> Result<Dataset, ReaderError> {
        let schema = self.schema();
        let batches = self.read_all_batches()?;
        let batch_schema = batches
            .first()
            .map(|b| b.schema())
            .unwrap_or_else(|| schema.clone());
        let batch = concat_batches(&batch_schema, &batches)?;

        let time_index = schema
            .index_of(DATETIME)
            .map_err(|_| ReaderError::ColumnNotFound(DATETIME.to_string()))?;
        let time_field = schema.field(time_index);
        let time = TimeCoordinate {
            values: time_values(batch.column(time_index), DATETIME)?,
            attrs: field_attributes(time_field)?,
        };

        let mut dataset = Dataset {
            time,
            coords: self.file_metadata.coordinates.clone(),
            variables: Vec::new(),
            attrs: self.file_metadata.global_attributes.clone(),
        };

        for (index, field) in schema.fields().iter().enumerate() {
            if index == time_index {
                continue;
            }
            let name = field.name().as_str();
            let column = batch.column(index);
            let attrs = field_attributes(field)?;

            let variable = match column_kind(field.data_type()) {
                ColumnKind::Float => Variable {
                    name: name.to_string(),
                    depth_dim: None,
                    values: Values::Float(float_values(column, name)?),
                    attrs,
                },
                ColumnKind::Text => Variable {
                    name: name.to_string(),
                    depth_dim: None,
                    values: Values::Text(text_values(column, name)?),
                    attrs,
                },
                ColumnKind::Profile => {
                    let Some(coord) = field_dimension(field).and_then(|d| dataset.coordinate(d))
                    else {
                        warn!(
                            "{}: profile column {} has no declared depth dimension, skipping",
                            self.path.display(),
                            name
                        );
                        continue;
                    };
                    let dim = coord.name.clone();
                    let values = profile_values(column, name, coord.len())?;
                    Variable {
                        name: name.to_string(),
                        depth_dim: Some(dim),
                        values: Values::Float(values),
                        attrs,
                    }
                }
                ColumnKind::Unsupported => {
                    warn!(
                        "{}: column {} has unsupported type {}, skipping",
                        self.path.display(),
                        name,
                        field.data_type()
                    );
                    continue;
                }
            };
            dataset.add_variable(variable);
        }

        dataset.validate()?;
        debug!(
            "Read {}: {} time points, {} variables",
            self.path.display(),
            dataset.num_times(),
            dataset.variables.len()
        );
        Ok(dataset)
    }
}

/// Open a dataset file and decode it
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, ReaderError> {
    DatasetReader::open(path)?.read_dataset()
}
