use std::fmt;

use crate::dataset::{seconds_to_datetime, AttrValue};
use crate::schema::ATTR_UNITS;

use super::{DatasetReader, ReaderError};

/// One variable line of a [`FileSummary`]
#[derive(Debug, Clone)]
pub struct VariableSummary {
    /// Variable name
    pub name: String,
    /// Dimensions, outermost first
    pub dims: Vec<String>,
    /// Units, when set
    pub units: Option<String>,
}

/// Summary of a dataset file
#[derive(Debug, Clone)]
pub struct FileSummary {
    /// Format version
    pub format_version: String,
    /// Number of time points
    pub num_times: usize,
    /// Time range as UTC seconds
    pub time_range: Option<(i64, i64)>,
    /// Non-time coordinates with their lengths
    pub coordinates: Vec<(String, usize)>,
    /// Variables in file order
    pub variables: Vec<VariableSummary>,
    /// Global attributes in stored order
    pub attributes: Vec<(String, AttrValue)>,
}

impl DatasetReader {
    /// Get summary information about the file
    pub fn summary(&self) -> Result<FileSummary, ReaderError> {
        let dataset = self.read_dataset()?;

        let variables = dataset
            .variables
            .iter()
            .map(|v| {
                let mut dims = vec![crate::schema::DATETIME.to_string()];
                dims.extend(v.depth_dim.clone());
                VariableSummary {
                    name: v.name.clone(),
                    dims,
                    units: v.attrs.get_str(ATTR_UNITS).map(str::to_string),
                }
            })
            .collect();

        Ok(FileSummary {
            format_version: self.file_metadata.format_version.clone(),
            num_times: dataset.num_times(),
            time_range: dataset.time_range(),
            coordinates: dataset
                .coords
                .iter()
                .map(|c| (c.name.clone(), c.len()))
                .collect(),
            variables,
            attributes: dataset
                .attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        })
    }
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WBTS Dataset Summary")?;
        writeln!(f, "====================")?;
        writeln!(f, "Format version: {}", self.format_version)?;
        writeln!(f, "Dimensions:")?;
        writeln!(f, "  DATETIME: {}", self.num_times)?;
        for (name, len) in &self.coordinates {
            writeln!(f, "  {}: {}", name, len)?;
        }
        if let Some((start, end)) = self.time_range {
            if let (Some(start), Some(end)) = (seconds_to_datetime(start), seconds_to_datetime(end)) {
                writeln!(f, "Time range: {} - {}", start, end)?;
            }
        }
        writeln!(f, "Variables:")?;
        for var in &self.variables {
            match &var.units {
                Some(units) => writeln!(f, "  {} ({}) [{}]", var.name, var.dims.join(", "), units)?,
                None => writeln!(f, "  {} ({})", var.name, var.dims.join(", "))?,
            }
        }
        writeln!(f, "Attributes:")?;
        for (key, value) in &self.attributes {
            writeln!(f, "  {}: {}", key, value)?;
        }
        Ok(())
    }
}
