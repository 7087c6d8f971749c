use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::schema::{ATTR_UNITS, DEPTH};

use super::DatasetError;

/// Value of a global or variable attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Numeric attribute (bounds, factors)
    Number(f64),
    /// Free text attribute
    Text(String),
}

impl AttrValue {
    /// Text content, if this is a text attribute
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Number(_) => None,
        }
    }

    /// Numeric content, if this is a number attribute
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Number(v) => Some(*v),
            AttrValue::Text(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(v) => write!(f, "{}", v),
            AttrValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

/// Insertion-ordered attribute map.
///
/// Setting an existing key replaces its value in place, so the position of a
/// key only changes through [`Attributes::reorder`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Vec<(String, AttrValue)>);

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an attribute
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a text attribute
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_str)
    }

    /// Whether the attribute is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace an attribute
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Remove an attribute, returning its value
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    /// Iterate over `(key, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no attribute is set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Move the keys listed in `order` to the front, in that order.
    ///
    /// Keys not listed keep their relative order after the listed ones.
    pub fn reorder(&mut self, order: &[&str]) {
        let rank = |key: &str| order.iter().position(|o| *o == key).unwrap_or(order.len());
        self.0.sort_by_key(|(k, _)| rank(k));
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

/// Values of a variable, stored row-major along (DATETIME, depth)
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    /// Floating point data; NaN marks a missing value
    Float(Vec<f64>),
    /// Text data (per-time labels only)
    Text(Vec<String>),
}

impl Values {
    /// Number of stored values
    pub fn len(&self) -> usize {
        match self {
            Values::Float(v) => v.len(),
            Values::Text(v) => v.len(),
        }
    }

    /// Whether no value is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Float values, if numeric
    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            Values::Float(v) => Some(v),
            Values::Text(_) => None,
        }
    }

    /// Text values, if textual
    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            Values::Text(v) => Some(v),
            Values::Float(_) => None,
        }
    }

    /// Short name of the value kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Values::Float(_) => "float",
            Values::Text(_) => "text",
        }
    }

    /// Gather rows of `row_len` values; `None` rows are filled with the
    /// missing marker (NaN or an empty string).
    pub(crate) fn take_rows(&self, row_len: usize, rows: &[Option<usize>]) -> Values {
        match self {
            Values::Float(values) => {
                let mut out = Vec::with_capacity(rows.len() * row_len);
                for row in rows {
                    match row {
                        Some(i) => out.extend_from_slice(&values[i * row_len..(i + 1) * row_len]),
                        None => out.extend(std::iter::repeat(f64::NAN).take(row_len)),
                    }
                }
                Values::Float(out)
            }
            Values::Text(values) => {
                let mut out = Vec::with_capacity(rows.len() * row_len);
                for row in rows {
                    match row {
                        Some(i) => out.extend_from_slice(&values[i * row_len..(i + 1) * row_len]),
                        None => out.extend(std::iter::repeat(String::new()).take(row_len)),
                    }
                }
                Values::Text(out)
            }
        }
    }
}

/// The shared `DATETIME` dimension, in UTC seconds since the Unix epoch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeCoordinate {
    /// Timestamps
    pub values: Vec<i64>,
    /// Attributes of the time coordinate
    pub attrs: Attributes,
}

impl TimeCoordinate {
    /// Number of time points
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the time coordinate is degenerate
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Earliest timestamp
    pub fn min(&self) -> Option<i64> {
        self.values.iter().copied().min()
    }

    /// Latest timestamp
    pub fn max(&self) -> Option<i64> {
        self.values.iter().copied().max()
    }

    /// Timestamp at `index` as a calendar date-time
    pub fn datetime(&self, index: usize) -> Option<NaiveDateTime> {
        self.values.get(index).copied().and_then(seconds_to_datetime)
    }
}

/// Convert UTC seconds since the epoch to a calendar date-time
pub fn seconds_to_datetime(seconds: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

/// Convert a calendar date-time (UTC) to seconds since the epoch
pub fn datetime_to_seconds(datetime: NaiveDateTime) -> i64 {
    datetime.and_utc().timestamp()
}

/// A 1-D non-time coordinate; each coordinate is its own dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Dimension name
    pub name: String,
    /// Coordinate values
    pub values: Vec<f64>,
    /// Coordinate attributes
    #[serde(default)]
    pub attrs: Attributes,
}

impl Coordinate {
    /// Create a coordinate without attributes
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            attrs: Attributes::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Number of points along this dimension
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the coordinate has no points
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A data variable along `DATETIME`, optionally spanning a depth dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Variable name
    pub name: String,
    /// Depth dimension for profile variables, `None` for per-time scalars
    pub depth_dim: Option<String>,
    /// Values, row-major along (DATETIME, depth_dim)
    pub values: Values,
    /// Variable attributes (`units`, `long_name`, ...)
    pub attrs: Attributes,
}

impl Variable {
    /// Per-time numeric variable
    pub fn time_series(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            depth_dim: None,
            values: Values::Float(values),
            attrs: Attributes::new(),
        }
    }

    /// Profile variable along (DATETIME, `depth_dim`)
    pub fn profile(name: impl Into<String>, depth_dim: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            depth_dim: Some(depth_dim.into()),
            values: Values::Float(values),
            attrs: Attributes::new(),
        }
    }

    /// Per-time text variable
    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            depth_dim: None,
            values: Values::Text(values),
            attrs: Attributes::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// The `units` attribute, if set as text
    pub fn units(&self) -> Option<&str> {
        self.attrs.get_str(ATTR_UNITS)
    }

    /// Whether the variable spans a depth dimension
    pub fn is_profile(&self) -> bool {
        self.depth_dim.is_some()
    }
}

/// A grid dataset: one `DATETIME` dimension, any number of depth-like
/// coordinates, and variables along them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Shared time coordinate
    pub time: TimeCoordinate,
    /// Non-time coordinates
    pub coords: Vec<Coordinate>,
    /// Data variables, in file order
    pub variables: Vec<Variable>,
    /// Global attributes
    pub attrs: Attributes,
}

impl Dataset {
    /// Create a dataset over the given timestamps
    pub fn new(times: Vec<i64>) -> Self {
        Self {
            time: TimeCoordinate {
                values: times,
                attrs: Attributes::new(),
            },
            ..Default::default()
        }
    }

    /// Number of time points
    pub fn num_times(&self) -> usize {
        self.time.len()
    }

    /// Look up a non-time coordinate
    pub fn coordinate(&self, name: &str) -> Option<&Coordinate> {
        self.coords.iter().find(|c| c.name == name)
    }

    /// Add a coordinate, replacing one of the same name
    pub fn add_coordinate(&mut self, coord: Coordinate) {
        match self.coords.iter_mut().find(|c| c.name == coord.name) {
            Some(existing) => *existing = coord,
            None => self.coords.push(coord),
        }
    }

    /// Look up a variable
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Look up a variable for modification
    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.name == name)
    }

    /// Whether a variable of that name exists
    pub fn has_variable(&self, name: &str) -> bool {
        self.variable(name).is_some()
    }

    /// Add a variable, replacing one of the same name
    pub fn add_variable(&mut self, variable: Variable) {
        match self.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
    }

    /// Remove a variable
    pub fn remove_variable(&mut self, name: &str) -> Option<Variable> {
        let pos = self.variables.iter().position(|v| v.name == name)?;
        Some(self.variables.remove(pos))
    }

    /// Number of values per time row of a variable
    pub fn row_len(&self, variable: &Variable) -> Result<usize, DatasetError> {
        match &variable.depth_dim {
            None => Ok(1),
            Some(dim) => self
                .coordinate(dim)
                .map(Coordinate::len)
                .ok_or_else(|| DatasetError::UnknownDimension {
                    name: variable.name.clone(),
                    dim: dim.clone(),
                }),
        }
    }

    /// Check that every variable matches the extent of its dimensions
    pub fn validate(&self) -> Result<(), DatasetError> {
        for variable in &self.variables {
            if variable.is_profile() && matches!(variable.values, Values::Text(_)) {
                return Err(DatasetError::TextProfile(variable.name.clone()));
            }
            let expected = self.num_times() * self.row_len(variable)?;
            if variable.values.len() != expected {
                return Err(DatasetError::ShapeMismatch {
                    name: variable.name.clone(),
                    expected,
                    found: variable.values.len(),
                });
            }
        }
        Ok(())
    }

    /// Rename a variable or a coordinate.
    ///
    /// Renaming a coordinate also updates every variable spanning it. Returns
    /// whether anything was renamed; renaming onto an existing name is refused.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if from == to || self.coordinate(to).is_some() || self.has_variable(to) {
            return false;
        }
        let mut renamed = false;
        if let Some(coord) = self.coords.iter_mut().find(|c| c.name == from) {
            coord.name = to.to_string();
            for variable in &mut self.variables {
                if variable.depth_dim.as_deref() == Some(from) {
                    variable.depth_dim = Some(to.to_string());
                }
            }
            renamed = true;
        }
        if let Some(variable) = self.variable_mut(from) {
            variable.name = to.to_string();
            renamed = true;
        }
        renamed
    }

    /// Finite min/max of a numeric variable or coordinate
    pub fn float_range(&self, name: &str) -> Option<(f64, f64)> {
        let values = match self.coordinate(name) {
            Some(coord) => coord.values.as_slice(),
            None => self.variable(name)?.values.as_float()?,
        };
        finite_range(values)
    }

    /// Finite min/max across every depth coordinate
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        self.coords
            .iter()
            .filter(|c| c.name.starts_with(DEPTH))
            .filter_map(|c| finite_range(&c.values))
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Earliest and latest timestamp
    pub fn time_range(&self) -> Option<(i64, i64)> {
        Some((self.time.min()?, self.time.max()?))
    }

    /// Gather time rows; `None` rows become missing values
    pub(crate) fn take_time_rows(
        &self,
        times: Vec<i64>,
        rows: &[Option<usize>],
    ) -> Result<Dataset, DatasetError> {
        let mut variables = Vec::with_capacity(self.variables.len());
        for variable in &self.variables {
            let row_len = self.row_len(variable)?;
            variables.push(Variable {
                name: variable.name.clone(),
                depth_dim: variable.depth_dim.clone(),
                values: variable.values.take_rows(row_len, rows),
                attrs: variable.attrs.clone(),
            });
        }
        Ok(Dataset {
            time: TimeCoordinate {
                values: times,
                attrs: self.time.attrs.clone(),
            },
            coords: self.coords.clone(),
            variables,
            attrs: self.attrs.clone(),
        })
    }

    /// Stable sort of all time rows by timestamp
    pub fn sort_by_time(&mut self) -> Result<(), DatasetError> {
        let mut order: Vec<usize> = (0..self.num_times()).collect();
        order.sort_by_key(|&i| self.time.values[i]);
        if order.iter().enumerate().all(|(pos, &i)| pos == i) {
            return Ok(());
        }
        let times = order.iter().map(|&i| self.time.values[i]).collect();
        let rows: Vec<Option<usize>> = order.into_iter().map(Some).collect();
        *self = self.take_time_rows(times, &rows)?;
        Ok(())
    }
}

/// Min/max of the finite values of a slice
pub(crate) fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
