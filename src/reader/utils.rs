use arrow::array::{Array, ArrayRef, Float64Array, ListArray, StringArray, TimestampSecondArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, TimeUnit};

use crate::dataset::{AttrValue, Attributes};
use crate::schema::{profile_item_field, KEY_DIMENSION, KEY_VARIABLE_ATTRIBUTES};

use super::ReaderError;

/// Column kinds understood by the dataset decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ColumnKind {
    Float,
    Text,
    Profile,
    Unsupported,
}

pub(super) fn column_kind(data_type: &DataType) -> ColumnKind {
    match data_type {
        DataType::Utf8 | DataType::LargeUtf8 => ColumnKind::Text,
        DataType::List(item) | DataType::LargeList(item) | DataType::FixedSizeList(item, _)
            if item.data_type().is_numeric() =>
        {
            ColumnKind::Profile
        }
        dt if dt.is_numeric() => ColumnKind::Float,
        _ => ColumnKind::Unsupported,
    }
}

/// Decode the time column as UTC seconds; any timestamp unit or Int64 seconds
pub(super) fn time_values(array: &ArrayRef, name: &str) -> Result<Vec<i64>, ReaderError> {
    let casted = cast(array, &DataType::Timestamp(TimeUnit::Second, None))?;
    let times = casted
        .as_any()
        .downcast_ref::<TimestampSecondArray>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not a timestamp", name)))?;
    if times.null_count() > 0 {
        return Err(ReaderError::InvalidFormat(format!(
            "{} has {} null entries",
            name,
            times.null_count()
        )));
    }
    Ok(times.values().to_vec())
}

/// Decode a numeric column as f64; nulls become NaN
pub(super) fn float_values(array: &ArrayRef, name: &str) -> Result<Vec<f64>, ReaderError> {
    let casted = cast(array, &DataType::Float64)?;
    let values = casted
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not Float64", name)))?;
    Ok(values
        .iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Decode a string column; nulls become empty strings
pub(super) fn text_values(array: &ArrayRef, name: &str) -> Result<Vec<String>, ReaderError> {
    let casted = cast(array, &DataType::Utf8)?;
    let values = casted
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not String", name)))?;
    Ok(values
        .iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

/// Decode a list column into row-major values of `row_len` per row.
///
/// Null rows become NaN rows; every other row must have exactly `row_len`
/// entries.
pub(super) fn profile_values(
    array: &ArrayRef,
    name: &str,
    row_len: usize,
) -> Result<Vec<f64>, ReaderError> {
    let casted = cast(array, &DataType::List(profile_item_field()))?;
    let lists = casted
        .as_any()
        .downcast_ref::<ListArray>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not List", name)))?;

    let mut out = Vec::with_capacity(lists.len() * row_len);
    for row in 0..lists.len() {
        if lists.is_null(row) {
            out.extend(std::iter::repeat(f64::NAN).take(row_len));
            continue;
        }
        let profile = lists.value(row);
        if profile.len() != row_len {
            return Err(ReaderError::InvalidFormat(format!(
                "{} row {} holds {} values, its dimension has {}",
                name,
                row,
                profile.len(),
                row_len
            )));
        }
        let values = profile
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| ReaderError::InvalidFormat(format!("{} items are not Float64", name)))?;
        out.extend(values.iter().map(|v| v.unwrap_or(f64::NAN)));
    }
    Ok(out)
}

/// Attributes stored on a field.
///
/// Fields written by this crate carry the full ordered list as JSON; for
/// foreign files every plain metadata key becomes a text attribute.
pub(super) fn field_attributes(field: &Field) -> Result<Attributes, ReaderError> {
    let metadata = field.metadata();
    if let Some(json) = metadata.get(KEY_VARIABLE_ATTRIBUTES) {
        return serde_json::from_str(json).map_err(|e| {
            ReaderError::MetadataError(format!("{} attributes: {}", field.name(), e))
        });
    }
    let mut keys: Vec<&String> = metadata.keys().filter(|k| !k.starts_with("wbts:")).collect();
    keys.sort();
    Ok(keys
        .into_iter()
        .map(|k| (k.clone(), AttrValue::Text(metadata[k].clone())))
        .collect())
}

/// Depth dimension declared for a profile field
pub(super) fn field_dimension(field: &Field) -> Option<&str> {
    field.metadata().get(KEY_DIMENSION).map(String::as_str)
}
