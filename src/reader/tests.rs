use super::*;
use crate::dataset::{AttrValue, Coordinate, Dataset, Variable};
use crate::schema::{DEPTH, GC_STRING, LATITUDE, TEMP, WBTS_FORMAT_VERSION};
use crate::writer::{write_dataset_file, WriterConfig};
use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::sync::Arc;
use tempfile::tempdir;

fn sample_dataset() -> Dataset {
    let mut ds = Dataset::new(vec![988_243_200, 988_250_400, 988_257_600]);
    ds.time.attrs.set("long_name", "Time");
    ds.add_coordinate(
        Coordinate::new(DEPTH, vec![0.0, 10.0])
            .with_attr("units", "m")
            .with_attr("positive", "down"),
    );
    ds.add_variable(
        Variable::time_series(LATITUDE, vec![26.5, 26.6, 26.7])
            .with_attr("units", "degrees_north"),
    );
    ds.add_variable(Variable::text(
        GC_STRING,
        vec!["GC_2001_04".to_string(); 3],
    ));
    ds.add_variable(
        Variable::profile(TEMP, DEPTH, vec![20.0, 19.0, f64::NAN, 18.0, 17.5, 17.0])
            .with_attr("units", "degree_C")
            .with_attr("valid_max", 40.0),
    );
    ds.attrs.set("title", "CTD data of the Abaco Cruise");
    ds.attrs.set("geospatial_lat_min", 26.5);
    ds
}

#[test]
fn test_read_write_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("cast.parquet");
    let original = sample_dataset();
    write_dataset_file(&path, &original, &WriterConfig::default())?;

    let reader = DatasetReader::open(&path)?;
    assert_eq!(reader.total_times(), 3);
    assert_eq!(reader.metadata().format_version, WBTS_FORMAT_VERSION);

    let ds = reader.read_dataset()?;
    assert_eq!(ds.time, original.time);
    assert_eq!(ds.coords, original.coords);
    assert_eq!(ds.attrs, original.attrs);
    assert_eq!(ds.variable(LATITUDE), original.variable(LATITUDE));
    assert_eq!(ds.variable(GC_STRING), original.variable(GC_STRING));

    let temp = ds.variable(TEMP).unwrap();
    assert_eq!(temp.depth_dim.as_deref(), Some(DEPTH));
    assert_eq!(temp.attrs.get("valid_max"), Some(&AttrValue::Number(40.0)));
    let values = temp.values.as_float().unwrap();
    assert_eq!(values.len(), 6);
    assert!(values[2].is_nan());
    assert_eq!(values[5], 17.0);

    let names: Vec<&str> = ds.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec![LATITUDE, GC_STRING, TEMP]);
    Ok(())
}

#[test]
fn test_read_foreign_parquet() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("foreign.parquet");

    let mut cast_meta = std::collections::HashMap::new();
    cast_meta.insert("units".to_string(), "1".to_string());
    let schema = Arc::new(Schema::new(vec![
        Field::new("DATETIME", DataType::Timestamp(TimeUnit::Millisecond, None), false),
        Field::new("CAST", DataType::Int32, true).with_metadata(cast_meta),
        Field::new("STATION", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(TimestampMillisecondArray::from(vec![1_000, 61_000])),
        Arc::new(Int32Array::from(vec![Some(1), None])),
        Arc::new(StringArray::from(vec![Some("AB1"), None])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let mut writer = ArrowWriter::try_new(File::create(&path)?, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    let ds = read_dataset(&path)?;
    assert_eq!(ds.time.values, vec![1, 61]);
    assert!(ds.coords.is_empty());
    assert!(ds.attrs.is_empty());

    let cast = ds.variable("CAST").unwrap();
    assert_eq!(cast.units(), Some("1"));
    let values = cast.values.as_float().unwrap();
    assert_eq!(values[0], 1.0);
    assert!(values[1].is_nan());

    let station = ds.variable("STATION").unwrap().values.as_text().unwrap();
    assert_eq!(station, &["AB1".to_string(), String::new()]);
    Ok(())
}

#[test]
fn test_missing_time_column() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("no_time.parquet");

    let schema = Arc::new(Schema::new(vec![Field::new("TEMP", DataType::Float64, true)]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(Float64Array::from(vec![1.0])) as ArrayRef],
    )?;
    let mut writer = ArrowWriter::try_new(File::create(&path)?, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    assert!(matches!(
        read_dataset(&path),
        Err(ReaderError::ColumnNotFound(_))
    ));
    Ok(())
}

#[test]
fn test_corrupt_file_is_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("corrupt.parquet");
    std::fs::write(&path, b"not a parquet file")?;

    assert!(DatasetReader::open(&path).is_err());
    Ok(())
}

#[test]
fn test_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("cast.parquet");
    write_dataset_file(&path, &sample_dataset(), &WriterConfig::default())?;

    let summary = DatasetReader::open(&path)?.summary()?;
    assert_eq!(summary.num_times, 3);
    assert_eq!(summary.coordinates, vec![(DEPTH.to_string(), 2)]);
    assert_eq!(summary.variables[2].dims, vec!["DATETIME", DEPTH]);

    let text = summary.to_string();
    assert!(text.contains("TEMP (DATETIME, DEPTH) [degree_C]"));
    assert!(text.contains("title: CTD data of the Abaco Cruise"));
    Ok(())
}
