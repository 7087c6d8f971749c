use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use std::path::{Path, PathBuf};

use wbts::dataset::{datetime_to_seconds, Coordinate, Dataset, Variable};
use wbts::schema::{
    CAST, DEPTH, ERROR_VELOCITY, LATITUDE, LONGITUDE, PRES, PSAL, TEMP, U_VELOCITY, V_VELOCITY,
};
use wbts::writer::{write_dataset_file, WriterConfig};

const DEMO_CONFIG: &str = r#"# Demo project generated by `wbts-merge demo`
input_dir = "WBTS_data"
output_dir = "WBTS_output"

[attributes]
comment = "Synthetic demo data"

[cruises.GC_2001_04]
cruise_id = "AB0104 / OC365-9"
ship = "R/V OCEANUS"
start_date = "2001-04-26"
end_date = "2001-05-07"
sections = "Abaco"

[cruises.GC_2002_05]
cruise_id = "AB0205 / KN166-11"
ship = "R/V KNORR"
start_date = "2002-05-02"
end_date = "2002-05-14"
sections = "Abaco"

[alignment]
policy = "nearest"
tolerance_seconds = 7200
"#;

/// One synthetic cruise of the demo tree
struct DemoCruise {
    dir: &'static str,
    start: (i32, u32, u32),
    casts: usize,
    with_ladcp: bool,
}

const DEMO_CRUISES: &[DemoCruise] = &[
    DemoCruise {
        dir: "GC_2001_04_AB0104",
        start: (2001, 4, 26),
        casts: 6,
        with_ladcp: true,
    },
    DemoCruise {
        dir: "GC_2002_05_KN166",
        start: (2002, 5, 2),
        casts: 4,
        with_ladcp: false,
    },
];

/// Hours between consecutive casts
const CAST_SPACING_HOURS: i64 = 8;

/// Generate a demo project: raw cruise tree plus `wbts.toml`
pub fn run(output: PathBuf) -> Result<()> {
    info!("Creating WBTS demo project in {}", output.display());
    let data_dir = output.join("WBTS_data");
    let config = WriterConfig::fast_write();

    let mut files = 0usize;
    for cruise in DEMO_CRUISES {
        let (y, m, d) = cruise.start;
        let start = NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .context("Invalid demo cruise date")?;
        let cruise_dir = data_dir.join(cruise.dir);

        for cast in 0..cruise.casts {
            let time = cast_time(start, cast);
            let path = cruise_dir
                .join("CTD")
                .join(format!("cast_{:03}.parquet", cast + 1));
            write_demo_file(&path, &synthetic_cast(time, cast), &config)?;
            files += 1;
        }

        if cruise.with_ladcp {
            // one velocity file per pair of casts, ensembles a few minutes off
            let dir = cruise_dir.join("FINAL_ADCP_PRODUCTS").join("ladcp_velfiles");
            for (file_index, chunk) in (0..cruise.casts).collect::<Vec<_>>().chunks(2).enumerate() {
                let times: Vec<i64> = chunk.iter().map(|&c| cast_time(start, c) + 300).collect();
                let path = dir.join(format!("ladcp_{:03}.parquet", file_index + 1));
                write_demo_file(&path, &synthetic_velocity(times, chunk[0]), &config)?;
                files += 1;
            }
        }
    }

    // derived products are ignored by discovery
    let derived = data_dir
        .join(DEMO_CRUISES[0].dir)
        .join("Created_files")
        .join("CTD");
    std::fs::create_dir_all(&derived)
        .with_context(|| format!("Failed to create {}", derived.display()))?;

    let config_path = output.join("wbts.toml");
    std::fs::write(&config_path, DEMO_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Demo project: {}", output.display());
    println!("  Raw files: {}", files);
    println!("  Configuration: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  wbts-merge merge-cruises --config {}", config_path.display());
    println!("  wbts-merge merge-years --config {}", config_path.display());

    Ok(())
}

fn cast_time(start: NaiveDateTime, cast: usize) -> i64 {
    datetime_to_seconds(start) + cast as i64 * CAST_SPACING_HOURS * 3600
}

fn write_demo_file(path: &Path, dataset: &Dataset, config: &WriterConfig) -> Result<()> {
    write_dataset_file(path, dataset, config)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// One CTD cast on a 20 m grid down to 2000 m, in source units
fn synthetic_cast(time: i64, cast: usize) -> Dataset {
    let depths: Vec<f64> = (0..=100).map(|i| i as f64 * 20.0).collect();
    let phase = cast as f64 * 0.37;

    let temp: Vec<f64> = depths
        .iter()
        .map(|z| 4.0 + 22.0 * (-z / 600.0).exp() + (z * 0.01 + phase).sin() * 0.05)
        .collect();
    let psal: Vec<f64> = depths
        .iter()
        .map(|z| 35.0 + 1.5 * (-z / 400.0).exp() - (z / 2000.0) * 0.1)
        .collect();
    let pres: Vec<f64> = depths.iter().map(|z| z * 1.0065).collect();

    let mut ds = Dataset::new(vec![time]);
    ds.add_coordinate(
        Coordinate::new(DEPTH, depths)
            .with_attr("units", "m")
            .with_attr("positive", "down"),
    );
    ds.add_variable(
        Variable::time_series(LATITUDE, vec![26.5 + (phase.sin() * 0.02)])
            .with_attr("units", "degrees_north"),
    );
    ds.add_variable(
        Variable::time_series(LONGITUDE, vec![-76.9 + cast as f64 * 0.1])
            .with_attr("units", "degrees_east"),
    );
    ds.add_variable(Variable::time_series(CAST, vec![(cast + 1) as f64]));
    ds.add_variable(
        Variable::profile(TEMP, DEPTH, temp)
            .with_attr("units", "degrees_Celsius")
            .with_attr("long_name", "Sea temperature"),
    );
    ds.add_variable(
        Variable::profile(PSAL, DEPTH, psal)
            .with_attr("units", "PSU")
            .with_attr("long_name", "Practical salinity"),
    );
    ds.add_variable(
        Variable::profile(PRES, DEPTH, pres)
            .with_attr("units", "decibar")
            .with_attr("long_name", "Sea pressure"),
    );
    ds.attrs.set("source", "synthetic CTD cast");
    ds
}

/// LADCP ensembles on an 8 m grid, velocities in cm/s
fn synthetic_velocity(times: Vec<i64>, first_cast: usize) -> Dataset {
    let depths: Vec<f64> = (1..=125).map(|i| i as f64 * 8.0).collect();
    let n = times.len();

    let mut u = Vec::with_capacity(n * depths.len());
    let mut v = Vec::with_capacity(n * depths.len());
    let mut err = Vec::with_capacity(n * depths.len());
    for k in 0..n {
        let phase = (first_cast + k) as f64 * 0.61;
        for z in &depths {
            // Deep Western Boundary Current: southward below ~800 m
            u.push(5.0 * (z / 300.0 + phase).cos());
            v.push(20.0 * (-z / 250.0).exp() - 10.0 * (z / 1000.0) + (z * 0.02).sin());
            err.push(1.0 + (z * 0.05 + phase).sin().abs());
        }
    }
    let casts: Vec<f64> = (0..n).map(|k| (first_cast + k + 1) as f64).collect();

    let mut ds = Dataset::new(times);
    ds.add_coordinate(Coordinate::new(DEPTH, depths).with_attr("units", "m"));
    ds.add_variable(Variable::time_series(CAST, casts));
    ds.add_variable(
        Variable::profile(U_VELOCITY, DEPTH, u)
            .with_attr("units", "cm/s")
            .with_attr("long_name", "Eastward velocity"),
    );
    ds.add_variable(
        Variable::profile(V_VELOCITY, DEPTH, v)
            .with_attr("units", "cm/s")
            .with_attr("long_name", "Northward velocity"),
    );
    ds.add_variable(
        Variable::profile(ERROR_VELOCITY, DEPTH, err)
            .with_attr("units", "cm/s")
            .with_attr("long_name", "Error velocity"),
    );
    ds.attrs.set("source", "synthetic LADCP profile");
    ds
}
