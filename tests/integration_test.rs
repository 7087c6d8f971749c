//! Integration tests for the WBTS merge pipeline
//!
//! These tests run the full pipeline on a synthetic cruise tree:
//! discovery, per-cruise merge, write, cross-year merge, read back.

use std::fs;
use std::path::Path;

use tempfile::tempdir;
use wbts::config::ProjectConfig;
use wbts::dataset::{Coordinate, Dataset, Variable};
use wbts::discovery::discover_cruises;
use wbts::merge::{merge_all_cruises, merge_years, merge_years_with, ARCHIVE_OUTPUT_FILE};
use wbts::reader::{read_dataset, DatasetReader};
use wbts::schema::{
    DEPTH, DEPTH_LADCP, GC_STRING, LATITUDE, LONGITUDE, PSAL, TEMP, TIME_FLAG, U_VELOCITY,
    V_VELOCITY,
};
use wbts::writer::{write_dataset_file, WriterConfig};

const CONFIG: &str = r#"
input_dir = "WBTS_data"
output_dir = "WBTS_output"

[attributes]
comment = "integration test"

[cruises.GC_2001_04]
cruise_id = "AB0104 / OC365-9"
ship = "R/V OCEANUS"
start_date = "2001-04-26"
end_date = "2001-05-07"

[cruises.GC_2002_05]
ship = "R/V KNORR"

[alignment]
policy = "nearest"
tolerance_seconds = 3600
"#;

/// 2001-04-26T12:00:00Z
const APRIL_2001: i64 = 988_286_400;
/// 2002-05-02T12:00:00Z
const MAY_2002: i64 = 1_020_340_800;
/// 2019-12-01T12:00:00Z
const DEC_2019: i64 = 1_575_201_600;

fn cast(time: i64, depths: &[f64], lon: f64) -> Dataset {
    let mut ds = Dataset::new(vec![time]);
    ds.add_coordinate(Coordinate::new(DEPTH, depths.to_vec()).with_attr("units", "m"));
    ds.add_variable(Variable::time_series(LATITUDE, vec![26.5]).with_attr("units", "degrees_north"));
    ds.add_variable(Variable::time_series(LONGITUDE, vec![lon]).with_attr("units", "degrees_east"));
    ds.add_variable(
        Variable::profile(TEMP, DEPTH, depths.iter().map(|z| 25.0 - z / 100.0).collect())
            .with_attr("units", "degrees_Celsius"),
    );
    ds.add_variable(
        Variable::profile(PSAL, DEPTH, vec![36.0; depths.len()]).with_attr("units", "PSU"),
    );
    ds
}

fn velocity(times: Vec<i64>) -> Dataset {
    let n = times.len();
    let mut ds = Dataset::new(times);
    ds.add_coordinate(Coordinate::new(DEPTH, vec![8.0, 16.0, 24.0]));
    ds.add_variable(Variable::profile(U_VELOCITY, DEPTH, vec![10.0; n * 3]).with_attr("units", "cm/s"));
    ds.add_variable(Variable::profile(V_VELOCITY, DEPTH, vec![-20.0; n * 3]).with_attr("units", "cm/s"));
    ds
}

fn write(path: &Path, ds: &Dataset) {
    write_dataset_file(path, ds, &WriterConfig::fast_write()).unwrap();
}

/// Raw tree:
/// - GC_2001_04: three casts + LADCP (one ensemble beyond tolerance)
/// - GC_2002_05: two casts on a deeper grid, no LADCP
/// - GC_2019_12: one cast; its LADCP directory is excluded by discovery
/// - a derived `Created_files/CTD` directory that must be ignored
fn build_project(root: &Path) -> ProjectConfig {
    let data = root.join("WBTS_data");

    let a = data.join("GC_2001_04_AB0104");
    for (i, offset) in [0, 28_800, 57_600].into_iter().enumerate() {
        write(
            &a.join("CTD").join(format!("cast_{}.parquet", i + 1)),
            &cast(APRIL_2001 + offset, &[0.0, 10.0, 20.0], -76.8 + i as f64 * 0.1),
        );
    }
    write(
        &a.join("FINAL_ADCP_PRODUCTS/ladcp_velfiles/ladcp.parquet"),
        &velocity(vec![APRIL_2001 + 300, APRIL_2001 + 28_800 + 300, APRIL_2001 + 57_600 + 7200]),
    );
    write(
        &a.join("Created_files/CTD/derived.parquet"),
        &cast(APRIL_2001, &[0.0], 0.0),
    );

    let b = data.join("GC_2002_05_KN166");
    for (i, offset) in [0, 28_800].into_iter().enumerate() {
        write(
            &b.join("CTD").join(format!("cast_{}.parquet", i + 1)),
            &cast(MAY_2002 + offset, &[0.0, 10.0, 20.0, 30.0], -77.0),
        );
    }

    let c = data.join("GC_2019_12_AT4201");
    write(&c.join("CTD/cast_1.parquet"), &cast(DEC_2019, &[0.0, 10.0, 20.0], -76.5));
    write(
        &c.join("FINAL_ADCP_PRODUCTS/ladcp_velfiles/ladcp.parquet"),
        &velocity(vec![DEC_2019]),
    );

    let config_path = root.join("wbts.toml");
    fs::write(&config_path, CONFIG).unwrap();
    ProjectConfig::from_file(&config_path).unwrap()
}

fn merge_and_write_cruises(project: &ProjectConfig) -> Vec<String> {
    let inputs = discover_cruises(&project.input_dir, &project.discovery);
    let mut names = Vec::new();
    for (cruise, result) in merge_all_cruises(&inputs, project) {
        let merge = result.unwrap_or_else(|e| panic!("{} failed: {}", cruise, e));
        let (path, _) = merge
            .write_to(&project.merged_dir(), &WriterConfig::default())
            .unwrap();
        names.push(path.file_name().unwrap().to_string_lossy().into_owned());
    }
    names
}

#[test]
fn test_discovery_finds_three_cruises() {
    let dir = tempdir().unwrap();
    let project = build_project(dir.path());

    let inputs = discover_cruises(&project.input_dir, &project.discovery);
    let ids: Vec<&str> = inputs.iter().map(|i| i.cruise.as_str()).collect();
    assert_eq!(ids, vec!["GC_2001_04", "GC_2002_05", "GC_2019_12"]);

    assert!(inputs[0].adcp_dir.is_some());
    assert!(inputs[1].adcp_dir.is_none());
    // 2019_12 velocities are excluded
    assert!(inputs[2].adcp_dir.is_none());
    assert!(inputs.iter().all(|i| !i.ctd_dir.to_string_lossy().contains("Created_files")));
}

#[test]
fn test_per_cruise_outputs() {
    let dir = tempdir().unwrap();
    let project = build_project(dir.path());

    let names = merge_and_write_cruises(&project);
    assert_eq!(
        names,
        vec![
            "WBTS_2001_04_CTD_LADCP.parquet",
            "WBTS_2002_05_CTD.parquet",
            "WBTS_2019_12_CTD.parquet",
        ]
    );

    let merged = read_dataset(project.merged_dir().join(&names[0])).unwrap();
    assert_eq!(merged.num_times(), 3);
    assert_eq!(merged.coordinate(DEPTH_LADCP).unwrap().values, vec![8.0, 16.0, 24.0]);

    let u = merged.variable(U_VELOCITY).unwrap();
    assert_eq!(u.units(), Some("m/s"));
    let values = u.values.as_float().unwrap();
    assert!((values[0] - 0.1).abs() < 1e-12);
    assert!((values[3] - 0.1).abs() < 1e-12);
    // third cast is two hours from its ensemble, beyond the one hour tolerance
    assert!(values[6..9].iter().all(|v| v.is_nan()));
    let flags = merged.variable(TIME_FLAG).unwrap().values.as_float().unwrap();
    assert_eq!(flags, &[1.0, 1.0, 0.0]);

    assert_eq!(merged.variable(TEMP).unwrap().units(), Some("degree_C"));
    assert_eq!(merged.variable(PSAL).unwrap().units(), Some("1e-3"));
    assert_eq!(merged.attrs.get_str("platform"), Some("R/V OCEANUS"));
    assert_eq!(merged.attrs.get_str("cruise_id"), Some("AB0104 / OC365-9"));
    assert_eq!(merged.attrs.get_str("comment"), Some("integration test"));
    assert_eq!(merged.attrs.get_str("time_cruise_end"), Some("2001-05-07"));

    let ctd_only = read_dataset(project.merged_dir().join(&names[1])).unwrap();
    assert_eq!(ctd_only.num_times(), 2);
    assert!(!ctd_only.has_variable(U_VELOCITY));
}

#[test]
fn test_full_pipeline_archive() {
    let dir = tempdir().unwrap();
    let project = build_project(dir.path());
    merge_and_write_cruises(&project);

    let archive = merge_years_with(&project.output_dir, &project.archive, &project.vocabulary).unwrap();
    assert_eq!(archive.inputs.len(), 3);
    assert!(archive.skipped.is_empty());
    archive.write(&WriterConfig::max_compression()).unwrap();

    let path = project.merged_dir().join(ARCHIVE_OUTPUT_FILE);
    let reader = DatasetReader::open(&path).unwrap();
    let ds = reader.read_dataset().unwrap();

    assert_eq!(ds.num_times(), 6);
    assert!(ds.time.values.windows(2).all(|w| w[0] <= w[1]));

    let labels = ds.variable(GC_STRING).unwrap().values.as_text().unwrap();
    assert_eq!(
        labels,
        ["GC_2001_04", "GC_2001_04", "GC_2001_04", "GC_2002_05", "GC_2002_05", "GC_2019_12"]
    );

    // outer join of the CTD depth grids
    assert_eq!(ds.coordinate(DEPTH).unwrap().values, vec![0.0, 10.0, 20.0, 30.0]);
    let temp = ds.variable(TEMP).unwrap().values.as_float().unwrap();
    assert_eq!(temp.len(), 6 * 4);
    assert!(temp[3].is_nan());
    // first GC_2002_05 cast reaches 30 m
    assert!(!temp[3 * 4 + 3].is_nan());

    // velocities only for the first cruise
    let u = ds.variable(U_VELOCITY).unwrap().values.as_float().unwrap();
    assert!(!u[0].is_nan());
    assert!(u[3 * 3..].iter().all(|v| v.is_nan()));

    let attrs = &ds.attrs;
    assert!(!attrs.contains("project_id"));
    assert!(!attrs.contains("cruise_id"));
    assert_eq!(attrs.get_str("platform"), Some("R/V OCEANUS, R/V KNORR"));
    assert_eq!(attrs.get_str("time_cruise_start"), Some("2001-04-26"));
    assert_eq!(attrs.get_str("time_cruise_end"), Some("2019-12-01"));
    assert_eq!(attrs.get("geospatial_lon_min").and_then(|v| v.as_f64()), Some(-77.0));
}

#[test]
fn test_archive_rebuild_converges() {
    let dir = tempdir().unwrap();
    let project = build_project(dir.path());
    merge_and_write_cruises(&project);

    let first = merge_years(&project.output_dir, None).unwrap();
    first.write(&WriterConfig::default()).unwrap();
    let second = merge_years(&project.output_dir, None).unwrap();

    assert_eq!(first.dataset.time.values, second.dataset.time.values);
    assert_eq!(second.inputs.len(), 3);
}

#[test]
fn test_archive_max_files() {
    let dir = tempdir().unwrap();
    let project = build_project(dir.path());
    merge_and_write_cruises(&project);

    let archive = merge_years(&project.output_dir, Some(2)).unwrap();
    assert_eq!(archive.dataset.num_times(), 5);
    assert!(archive.dataset.has_variable(U_VELOCITY));
}
