use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::ProjectConfig;
use crate::dataset::{concat_time, AlignmentReport, Dataset, Variable};
use crate::discovery::{CruiseId, CruiseInputs};
use crate::metadata::{
    apply_cruise_attributes, apply_geospatial_bounds, apply_time_extent, order_attributes,
    project_attributes, stamp_date_created, InstrumentSet,
};
use crate::schema::{
    DATASET_FILE_PATTERN, DEPTH, DEPTH_LADCP, GC_STRING, TIME_FLAG, WBTS_EXTENSION,
};
use crate::writer::{write_dataset_file, WriterConfig, WriterStats};

use super::load::{list_files, load_all, order_by_start, SkippedFile};
use super::MergeError;

/// Result of merging one cruise
#[derive(Debug, Clone)]
pub struct CruiseMerge {
    /// Cruise identifier
    pub cruise: CruiseId,
    /// Merged CTD (and velocity) dataset
    pub dataset: Dataset,
    /// CTD files that went into the merge
    pub cast_files: Vec<PathBuf>,
    /// Velocity files that went into the merge
    pub velocity_files: Vec<PathBuf>,
    /// Files that could not be loaded
    pub skipped: Vec<SkippedFile>,
    /// Velocity alignment outcome, when velocities were merged
    pub alignment: Option<AlignmentReport>,
}

impl CruiseMerge {
    /// Whether velocity data was merged in
    pub fn has_velocity(&self) -> bool {
        self.alignment.is_some()
    }

    /// Output file name of this cruise
    pub fn output_name(&self) -> String {
        cruise_output_name(&self.cruise, self.has_velocity())
    }

    /// Write the merged dataset into `merged_dir`
    pub fn write_to(
        &self,
        merged_dir: &Path,
        config: &WriterConfig,
    ) -> Result<(PathBuf, WriterStats), MergeError> {
        let path = merged_dir.join(self.output_name());
        let stats = write_dataset_file(&path, &self.dataset, config)?;
        info!("{}: {}", path.display(), stats);
        Ok((path, stats))
    }
}

/// Output file name of a cruise: `WBTS_YYYY_MM_CTD_LADCP.parquet` or
/// `WBTS_YYYY_MM_CTD.parquet`
pub fn cruise_output_name(cruise: &CruiseId, has_velocity: bool) -> String {
    let instruments = if has_velocity {
        InstrumentSet::CtdLadcp
    } else {
        InstrumentSet::Ctd
    };
    format!(
        "WBTS_{}_{}.{}",
        cruise.year_month(),
        instruments.file_suffix(),
        WBTS_EXTENSION
    )
}

/// Merge the CTD casts and LADCP velocity files of one cruise.
///
/// Casts define the time coordinate. Velocity profiles keep their own depth
/// coordinate (`DEPTH_LADCP`) and are aligned onto the cast times with the
/// configured policy. CTD variables win over velocity variables of the same
/// name.
pub fn merge_cruise(inputs: &CruiseInputs, project: &ProjectConfig) -> Result<CruiseMerge, MergeError> {
    let cruise = inputs.cruise.clone();
    let vocabulary = &project.vocabulary;

    // CTD casts
    let cast_paths = list_files(&inputs.ctd_dir, DATASET_FILE_PATTERN)?;
    if cast_paths.is_empty() {
        return Err(MergeError::NoInputData {
            cruise,
            reason: format!("no cast files in {}", inputs.ctd_dir.display()),
        });
    }
    let mut casts = load_all(&cast_paths, vocabulary, false);
    let mut skipped = std::mem::take(&mut casts.skipped);
    if casts.datasets.is_empty() {
        return Err(MergeError::NoInputData {
            cruise,
            reason: format!("none of {} cast files could be loaded", cast_paths.len()),
        });
    }
    order_by_start(&mut casts.datasets);
    let cast_files: Vec<PathBuf> = casts.datasets.iter().map(|(p, _)| p.clone()).collect();
    let cast_sets: Vec<Dataset> = casts.datasets.into_iter().map(|(_, ds)| ds).collect();
    let mut dataset = concat_time(&cast_sets)?;
    if dataset.time.is_empty() {
        return Err(MergeError::CoordinateMismatch {
            cruise,
            reason: "CTD time coordinate is empty".to_string(),
        });
    }

    // LADCP velocities
    let mut velocity_files = Vec::new();
    let mut alignment = None;
    if let Some(adcp_dir) = &inputs.adcp_dir {
        let velocity_paths = list_files(adcp_dir, DATASET_FILE_PATTERN)?;
        let mut velocities = load_all(&velocity_paths, vocabulary, false);
        skipped.append(&mut velocities.skipped);

        if velocities.datasets.is_empty() {
            warn!(
                "{}: no loadable velocity files in {}, merging CTD only",
                cruise,
                adcp_dir.display()
            );
        } else {
            order_by_start(&mut velocities.datasets);
            velocity_files = velocities.datasets.iter().map(|(p, _)| p.clone()).collect();
            let sets: Vec<Dataset> = velocities.datasets.into_iter().map(|(_, ds)| ds).collect();
            let mut velocity = concat_time(&sets)?;
            if velocity.time.is_empty() {
                return Err(MergeError::CoordinateMismatch {
                    cruise,
                    reason: "velocity time coordinate is empty".to_string(),
                });
            }
            velocity.rename(DEPTH, DEPTH_LADCP);

            let (aligned, report) = project
                .alignment
                .align(&velocity, &dataset)
                .map_err(|e| MergeError::CoordinateMismatch {
                    cruise: cruise.clone(),
                    reason: e.to_string(),
                })?;
            info!(
                "{}: aligned {} of {} casts to velocity profiles (max offset {} s)",
                cruise,
                report.matched,
                dataset.num_times(),
                report.max_offset_seconds
            );
            merge_variables(&mut dataset, aligned, &cruise)?;
            dataset.add_variable(
                Variable::time_series(TIME_FLAG, report.time_flags())
                    .with_attr("long_name", "Cast matched to a velocity profile")
                    .with_attr("comment", "1 = matched, 0 = no velocity profile within tolerance"),
            );
            alignment = Some(report);
        }
    }

    if !dataset.has_variable(GC_STRING) {
        let label = cruise.to_string();
        dataset.add_variable(Variable::text(GC_STRING, vec![label; dataset.num_times()]));
    }

    // Global attributes
    let instruments = if alignment.is_some() {
        InstrumentSet::CtdLadcp
    } else {
        InstrumentSet::Ctd
    };
    for (key, value) in project_attributes(&project.attributes).iter() {
        dataset.attrs.set(key, value.clone());
    }
    dataset.attrs.set("title", instruments.title());
    dataset.attrs.set("instrument", instruments.instrument());
    apply_time_extent(&mut dataset);
    let info = project.cruise(&cruise);
    if info.is_none() {
        warn!("{}: cruise not found in configuration", cruise);
    }
    apply_cruise_attributes(&mut dataset.attrs, &cruise, info);
    apply_geospatial_bounds(&mut dataset);
    stamp_date_created(&mut dataset.attrs);
    order_attributes(&mut dataset.attrs);

    dataset.validate()?;
    info!(
        "{}: merged {} cast files, {} velocity files ({} skipped)",
        cruise,
        cast_files.len(),
        velocity_files.len(),
        skipped.len()
    );

    Ok(CruiseMerge {
        cruise,
        dataset,
        cast_files,
        velocity_files,
        skipped,
        alignment,
    })
}

/// Add the coordinates and variables of an aligned velocity dataset
fn merge_variables(dataset: &mut Dataset, aligned: Dataset, cruise: &CruiseId) -> Result<(), MergeError> {
    for coord in aligned.coords {
        match dataset.coordinate(&coord.name) {
            Some(existing) if existing.values != coord.values => {
                return Err(MergeError::CoordinateMismatch {
                    cruise: cruise.clone(),
                    reason: format!("coordinate {} differs between CTD and velocity data", coord.name),
                });
            }
            Some(_) => {}
            None => dataset.add_coordinate(coord),
        }
    }
    for variable in aligned.variables {
        if !dataset.has_variable(&variable.name) {
            dataset.add_variable(variable);
        }
    }
    Ok(())
}

/// Merge every cruise independently.
///
/// One cruise's failure never affects another. Under the `parallel` feature
/// cruises are merged on the rayon thread pool; results keep the input order.
pub fn merge_all_cruises(
    inputs: &[CruiseInputs],
    project: &ProjectConfig,
) -> Vec<(CruiseId, Result<CruiseMerge, MergeError>)> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        inputs
            .par_iter()
            .map(|input| (input.cruise.clone(), merge_cruise(input, project)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        inputs
            .iter()
            .map(|input| (input.cruise.clone(), merge_cruise(input, project)))
            .collect()
    }
}
