use super::*;
use crate::dataset::{Coordinate, Dataset, Variable};
use crate::schema::{DEPTH, GC_STRING, LATITUDE, TEMP};
use std::io::Cursor;
use tempfile::tempdir;

fn small_dataset() -> Dataset {
    let mut ds = Dataset::new(vec![988_243_200, 988_246_800]);
    ds.add_coordinate(Coordinate::new(DEPTH, vec![0.0, 10.0]).with_attr("units", "m"));
    ds.add_variable(Variable::time_series(LATITUDE, vec![26.5, 26.6]));
    ds.add_variable(Variable::text(
        GC_STRING,
        vec!["GC_2001_04".to_string(), "GC_2001_04".to_string()],
    ));
    ds.add_variable(Variable::profile(TEMP, DEPTH, vec![20.0, 19.5, f64::NAN, 19.0]));
    ds.attrs.set("title", "CTD data of the Abaco Cruise");
    ds
}

#[test]
fn test_write_dataset() -> Result<(), WriterError> {
    let buffer = Cursor::new(Vec::new());
    let stats = write_dataset(buffer, &small_dataset(), &WriterConfig::default())?;

    assert_eq!(stats.times_written, 2);
    assert_eq!(stats.variables_written, 3);
    assert_eq!(stats.row_groups_written, 1);
    Ok(())
}

#[test]
fn test_append_rows() -> Result<(), WriterError> {
    let ds = small_dataset();
    let mut writer = DatasetWriter::new(Cursor::new(Vec::new()), &ds, &WriterConfig::fast_write())?;
    writer.write(&ds)?;
    writer.write(&ds)?;
    let stats = writer.finish()?;

    assert_eq!(stats.times_written, 4);
    Ok(())
}

#[test]
fn test_write_file_replaces_atomically() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("Merged").join("WBTS_2001_04_CTD.parquet");

    write_dataset_file(&path, &small_dataset(), &WriterConfig::default())?;
    let stats = write_dataset_file(&path, &small_dataset(), &WriterConfig::max_compression())?;

    assert!(path.exists());
    assert_eq!(std::fs::read_dir(path.parent().unwrap())?.count(), 1);
    assert_eq!(stats.file_size_bytes, std::fs::metadata(&path)?.len());
    Ok(())
}

#[test]
fn test_rejects_non_finite_coordinate() {
    let mut ds = small_dataset();
    ds.add_coordinate(Coordinate::new(DEPTH, vec![0.0, f64::NAN]));

    let result = write_dataset(Cursor::new(Vec::new()), &ds, &WriterConfig::default());
    assert!(matches!(result, Err(WriterError::InvalidData(_))));
}

#[test]
fn test_rejects_invalid_shape() {
    let mut ds = small_dataset();
    ds.add_variable(Variable::time_series(LATITUDE, vec![26.5]));

    let result = write_dataset(Cursor::new(Vec::new()), &ds, &WriterConfig::default());
    assert!(matches!(result, Err(WriterError::DatasetError(_))));
}

#[test]
fn test_failed_file_write_leaves_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("bad.parquet");
    let mut ds = small_dataset();
    ds.attrs.set("geospatial_lat_min", f64::NAN);

    assert!(write_dataset_file(&path, &ds, &WriterConfig::default()).is_err());
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_write_file_leaves_neighbouring_tmp_files_alone() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let first = dir.path().join("WBTS_2001_04_CTD.parquet");
    let second = dir.path().join("WBTS_2002_05_CTD.parquet");
    std::fs::create_dir(first.with_extension("parquet.tmp"))?;
    std::fs::write(second.with_extension("parquet.tmp"), b"unrelated")?;

    write_dataset_file(&first, &small_dataset(), &WriterConfig::default())?;
    write_dataset_file(&second, &small_dataset(), &WriterConfig::default())?;

    assert!(first.is_file());
    assert!(second.is_file());
    assert!(first.with_extension("parquet.tmp").is_dir());
    assert_eq!(std::fs::read(second.with_extension("parquet.tmp"))?, b"unrelated");
    Ok(())
}
