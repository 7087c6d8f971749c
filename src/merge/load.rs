use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, warn};

use crate::dataset::Dataset;
use crate::reader::{read_dataset, ReaderError};
use crate::units::{normalize_units_in_place, rename_variables, Vocabulary};

use super::MergeError;

/// A file left out of a merge, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Skipped file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Successfully loaded inputs plus the files that were skipped
#[derive(Debug, Default)]
pub(crate) struct LoadedFiles {
    pub datasets: Vec<(PathBuf, Dataset)>,
    pub skipped: Vec<SkippedFile>,
}

/// Regular files in `dir` matching `pattern`, sorted by path
pub(crate) fn list_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, MergeError> {
    let full = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), pattern);
    let mut files = Vec::new();
    for entry in glob::glob(&full)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Could not read path from pattern {}: {}", full, e),
        }
    }
    files.sort();
    Ok(files)
}

/// Read one file, apply the vocabulary renames and normalize units
pub(crate) fn load_normalized(path: &Path, vocabulary: &Vocabulary) -> Result<Dataset, ReaderError> {
    let mut dataset = read_dataset(path)?;
    rename_variables(&mut dataset, vocabulary);
    let converted = normalize_units_in_place(&mut dataset, vocabulary);
    debug!(
        "Loaded {} ({} time points, {} variables converted)",
        path.display(),
        dataset.num_times(),
        converted
    );
    Ok(dataset)
}

/// Load every file, skipping (and recording) failures.
///
/// With `skip_empty`, datasets without time points are skipped as well.
pub(crate) fn load_all(paths: &[PathBuf], vocabulary: &Vocabulary, skip_empty: bool) -> LoadedFiles {
    let mut loaded = LoadedFiles::default();
    for path in paths {
        match load_normalized(path, vocabulary) {
            Ok(dataset) if skip_empty && dataset.time.is_empty() => {
                warn!("Skipping {}: no time points", path.display());
                loaded.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: "dataset has no time points".to_string(),
                });
            }
            Ok(dataset) => loaded.datasets.push((path.clone(), dataset)),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                loaded.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    loaded
}

/// Order datasets by their earliest time point, then by path
pub(crate) fn order_by_start(datasets: &mut [(PathBuf, Dataset)]) {
    datasets.sort_by(|(pa, a), (pb, b)| {
        a.time
            .min()
            .unwrap_or(i64::MAX)
            .cmp(&b.time.min().unwrap_or(i64::MAX))
            .then_with(|| pa.cmp(pb))
    });
}
