use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder, TimeUnit};

use crate::dataset::{Attributes, Dataset, Values, Variable};

use super::columns;
use super::constants::{
    ATTR_LONG_NAME, ATTR_UNITS, KEY_DIMENSION, KEY_FORMAT_VERSION, KEY_VARIABLE_ATTRIBUTES,
    WBTS_FORMAT_VERSION,
};

/// Creates a Field carrying the variable attributes as metadata.
///
/// `units` and `long_name` are copied as plain keys so generic Parquet tools
/// can see them; the full ordered attribute list is stored as JSON.
fn field_with_attrs(
    name: &str,
    data_type: DataType,
    nullable: bool,
    attrs: &Attributes,
    depth_dim: Option<&str>,
) -> Result<Field, serde_json::Error> {
    let mut metadata = HashMap::new();
    for key in [ATTR_UNITS, ATTR_LONG_NAME] {
        if let Some(value) = attrs.get(key) {
            metadata.insert(key.to_string(), value.to_string());
        }
    }
    if !attrs.is_empty() {
        metadata.insert(
            KEY_VARIABLE_ATTRIBUTES.to_string(),
            serde_json::to_string(attrs)?,
        );
    }
    if let Some(dim) = depth_dim {
        metadata.insert(KEY_DIMENSION.to_string(), dim.to_string());
    }
    Ok(Field::new(name, data_type, nullable).with_metadata(metadata))
}

/// Item field of the profile list columns
pub fn profile_item_field() -> Arc<Field> {
    Arc::new(Field::new("item", DataType::Float64, true))
}

/// Arrow type used to store a variable
pub fn variable_data_type(variable: &Variable) -> DataType {
    match (&variable.values, &variable.depth_dim) {
        (Values::Text(_), _) => DataType::Utf8,
        (Values::Float(_), None) => DataType::Float64,
        (Values::Float(_), Some(_)) => DataType::List(profile_item_field()),
    }
}

/// Creates the Arrow schema of a dataset file.
///
/// One row per `DATETIME` entry: the time column comes first, then one column
/// per variable. Profile variables become `List<Float64>` columns holding the
/// values along their depth dimension.
pub fn create_dataset_schema(dataset: &Dataset) -> Result<Schema, serde_json::Error> {
    let mut builder = SchemaBuilder::new();

    builder.push(field_with_attrs(
        columns::DATETIME,
        DataType::Timestamp(TimeUnit::Second, None),
        false,
        &dataset.time.attrs,
        None,
    )?);

    for variable in &dataset.variables {
        builder.push(field_with_attrs(
            &variable.name,
            variable_data_type(variable),
            true,
            &variable.attrs,
            variable.depth_dim.as_deref(),
        )?);
    }

    let mut metadata = HashMap::new();
    metadata.insert(KEY_FORMAT_VERSION.to_string(), WBTS_FORMAT_VERSION.to_string());

    Ok(builder.finish().with_metadata(metadata))
}

/// Returns an Arc-wrapped schema for shared ownership
pub fn create_dataset_schema_arc(dataset: &Dataset) -> Result<Arc<Schema>, serde_json::Error> {
    Ok(Arc::new(create_dataset_schema(dataset)?))
}
