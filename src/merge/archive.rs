use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::dataset::{concat_time, Dataset};
use crate::metadata::{
    apply_geospatial_bounds, apply_time_extent, order_attributes, stamp_date_created,
    InstrumentSet, ARCHIVE_SECTIONS,
};
use crate::schema::{
    DATASET_FILE_PATTERN, DATETIME, GC_STRING, LONGITUDE, U_VELOCITY, V_VELOCITY,
};
use crate::units::Vocabulary;
use crate::writer::{write_dataset_file, WriterConfig, WriterStats};

use super::load::{list_files, load_all, order_by_start, SkippedFile};
use super::MergeError;

/// Designated file name of the multi-year archive
pub const ARCHIVE_OUTPUT_FILE: &str = "WBTS_all_years_CTD_LADCP.parquet";

/// Default directory of per-cruise outputs below an archive root
pub const MERGED_DIR_NAME: &str = "Merged";

/// Options of the cross-year merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveOptions {
    /// Directory of per-cruise files below the archive root
    pub merged_dir_name: String,
    /// Archive file name; always excluded from the inputs
    pub output_file_name: String,
    /// Merge only the first `max_files` files (by name)
    pub max_files: Option<usize>,
    /// `sections` attribute of the archive
    pub sections: String,
    /// `title` attribute of the archive
    pub title: String,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            merged_dir_name: MERGED_DIR_NAME.to_string(),
            output_file_name: ARCHIVE_OUTPUT_FILE.to_string(),
            max_files: None,
            sections: ARCHIVE_SECTIONS.to_string(),
            title: "CTD and LADCP data of the Western Boundary Time Series".to_string(),
        }
    }
}

/// Result of the cross-year merge
#[derive(Debug, Clone)]
pub struct ArchiveMerge {
    /// Concatenated archive dataset, sorted by `DATETIME`
    pub dataset: Dataset,
    /// Files that went into the archive, in concatenation order
    pub inputs: Vec<PathBuf>,
    /// Files that could not be loaded or held no data
    pub skipped: Vec<SkippedFile>,
    /// Designated destination of the archive
    pub output_path: PathBuf,
}

impl ArchiveMerge {
    /// Write the archive to its designated destination, replacing any
    /// previous archive
    pub fn write(&self, config: &WriterConfig) -> Result<WriterStats, MergeError> {
        let stats = write_dataset_file(&self.output_path, &self.dataset, config)?;
        info!("{}: {}", self.output_path.display(), stats);
        Ok(stats)
    }
}

/// Concatenate every per-cruise file in `<archive_root>/Merged`.
///
/// ```rust,no_run
/// use std::path::Path;
/// use wbts::merge::merge_years;
/// use wbts::writer::WriterConfig;
///
/// let archive = merge_years(Path::new("WBTS_output"), None)?;
/// archive.write(&WriterConfig::default())?;
/// # Ok::<(), wbts::merge::MergeError>(())
/// ```
pub fn merge_years(archive_root: &Path, max_files: Option<usize>) -> Result<ArchiveMerge, MergeError> {
    let options = ArchiveOptions {
        max_files,
        ..Default::default()
    };
    merge_years_with(archive_root, &options, &Vocabulary::default())
}

/// Cross-year merge with explicit options.
///
/// The archive's own output file is excluded before anything is loaded, so a
/// stale or corrupt previous archive never feeds into the next one.
pub fn merge_years_with(
    archive_root: &Path,
    options: &ArchiveOptions,
    vocabulary: &Vocabulary,
) -> Result<ArchiveMerge, MergeError> {
    let merged_dir = archive_root.join(&options.merged_dir_name);
    let mut paths: Vec<PathBuf> = list_files(&merged_dir, DATASET_FILE_PATTERN)?
        .into_iter()
        .filter(|p| p.file_name().and_then(|n| n.to_str()) != Some(options.output_file_name.as_str()))
        .collect();
    if let Some(max) = options.max_files {
        paths.truncate(max);
    }
    info!("Merging {} files from {}", paths.len(), merged_dir.display());

    let mut loaded = load_all(&paths, vocabulary, true);
    if loaded.datasets.is_empty() {
        return Err(MergeError::NoValidDatasets(merged_dir));
    }
    order_by_start(&mut loaded.datasets);

    let mut platforms: Vec<String> = Vec::new();
    for (_, ds) in &loaded.datasets {
        if let Some(platform) = ds.attrs.get_str("platform") {
            if !platforms.iter().any(|p| p == platform) {
                platforms.push(platform.to_string());
            }
        }
    }

    let inputs: Vec<PathBuf> = loaded.datasets.iter().map(|(p, _)| p.clone()).collect();
    let sets: Vec<Dataset> = loaded.datasets.into_iter().map(|(_, ds)| ds).collect();
    let instruments = archive_instruments(&sets);
    let mut dataset = concat_time(&sets)?;
    dataset.sort_by_time()?;

    for name in [LONGITUDE, GC_STRING] {
        if !dataset.has_variable(name) {
            warn!("Archive has no {} variable", name);
        }
    }
    if dataset.time.is_empty() {
        warn!("Archive has an empty {} coordinate", DATETIME);
    }

    let attrs = &mut dataset.attrs;
    attrs.remove("project_id");
    attrs.remove("cruise_id");
    if platforms.is_empty() {
        attrs.remove("platform");
    } else {
        attrs.set("platform", platforms.join(", "));
    }
    attrs.set("title", options.title.as_str());
    attrs.set("instrument", instruments.instrument());
    attrs.set("sections", options.sections.as_str());
    apply_time_extent(&mut dataset);
    apply_geospatial_bounds(&mut dataset);
    stamp_date_created(&mut dataset.attrs);
    order_attributes(&mut dataset.attrs);

    info!(
        "Archive: {} time points from {} files ({} skipped)",
        dataset.num_times(),
        inputs.len(),
        loaded.skipped.len()
    );

    Ok(ArchiveMerge {
        dataset,
        inputs,
        skipped: loaded.skipped,
        output_path: merged_dir.join(&options.output_file_name),
    })
}

/// LADCP counts if any input carries velocities or names it as an instrument
fn archive_instruments(sets: &[Dataset]) -> InstrumentSet {
    let with_ladcp = sets.iter().any(|ds| {
        ds.has_variable(U_VELOCITY)
            || ds.has_variable(V_VELOCITY)
            || ds.attrs.get_str("instrument").is_some_and(|i| i.contains("LADCP"))
    });
    if with_ladcp {
        InstrumentSet::CtdLadcp
    } else {
        InstrumentSet::Ctd
    }
}
