//! Alignment of one dataset onto another dataset's time coordinate.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::schema::CAST;

use super::types::Dataset;
use super::DatasetError;

/// Default nearest-neighbor tolerance (two hours)
pub const DEFAULT_MATCH_TOLERANCE_SECONDS: i64 = 7200;

/// Which candidate wins when two source times are equally near a target time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Keep the earlier source time
    #[default]
    Earlier,
    /// Keep the later source time
    Later,
}

/// Nearest-neighbor time matching parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeMatching {
    /// Maximum offset in seconds; `None` matches regardless of distance
    pub tolerance_seconds: Option<i64>,
    /// Tie resolution
    pub tie: TieBreak,
}

impl Default for TimeMatching {
    fn default() -> Self {
        Self {
            tolerance_seconds: Some(DEFAULT_MATCH_TOLERANCE_SECONDS),
            tie: TieBreak::default(),
        }
    }
}

impl TimeMatching {
    /// Matching without a distance limit
    pub fn unbounded() -> Self {
        Self {
            tolerance_seconds: None,
            ..Default::default()
        }
    }

    /// Builder-style tolerance setter
    pub fn with_tolerance(mut self, seconds: i64) -> Self {
        self.tolerance_seconds = Some(seconds);
        self
    }

    /// Builder-style tie policy setter
    pub fn with_tie(mut self, tie: TieBreak) -> Self {
        self.tie = tie;
        self
    }
}

/// How velocity records are matched to CTD casts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// Nearest source time within a tolerance
    Nearest(TimeMatching),
    /// Equal `CAST` numbers
    CastNumber,
}

impl Default for AlignmentPolicy {
    fn default() -> Self {
        AlignmentPolicy::Nearest(TimeMatching::default())
    }
}

impl AlignmentPolicy {
    /// Reindex `source` onto the time coordinate of `target`
    pub fn align(
        &self,
        source: &Dataset,
        target: &Dataset,
    ) -> Result<(Dataset, AlignmentReport), DatasetError> {
        match self {
            AlignmentPolicy::Nearest(matching) => {
                reindex_nearest(source, &target.time.values, matching)
            }
            AlignmentPolicy::CastNumber => reindex_by_cast(source, target),
        }
    }
}

/// Outcome of an alignment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentReport {
    /// Target times that received a source row
    pub matched: usize,
    /// Target times left missing
    pub unmatched: usize,
    /// Largest absolute time offset among matches
    pub max_offset_seconds: i64,
    /// Per target time, whether a source row was matched
    pub matched_rows: Vec<bool>,
}

impl AlignmentReport {
    fn from_rows(rows: &[Option<usize>], offsets: impl Iterator<Item = i64>) -> Self {
        let matched = rows.iter().filter(|r| r.is_some()).count();
        Self {
            matched,
            unmatched: rows.len() - matched,
            max_offset_seconds: offsets.max().unwrap_or(0),
            matched_rows: rows.iter().map(Option::is_some).collect(),
        }
    }

    /// `TIME_FLAG` values: 1 where a source row was matched, 0 elsewhere
    pub fn time_flags(&self) -> Vec<f64> {
        self.matched_rows
            .iter()
            .map(|&matched| if matched { 1.0 } else { 0.0 })
            .collect()
    }
}

/// Nearest source row for each target time.
///
/// Duplicate source times resolve to their first occurrence.
pub fn nearest_rows(source_times: &[i64], target_times: &[i64], matching: &TimeMatching) -> Vec<Option<usize>> {
    let mut order: Vec<usize> = (0..source_times.len()).collect();
    order.sort_by_key(|&i| source_times[i]);
    let sorted: Vec<i64> = order.iter().map(|&i| source_times[i]).collect();

    target_times
        .iter()
        .map(|&t| {
            let after = sorted.partition_point(|&s| s < t);
            let before_candidate = after.checked_sub(1).map(|b| {
                // first occurrence of that time
                sorted.partition_point(|&s| s < sorted[b])
            });
            let after_candidate = (after < sorted.len()).then_some(after);

            let pick = match (before_candidate, after_candidate) {
                (None, None) => None,
                (Some(b), None) => Some(b),
                (None, Some(a)) => Some(a),
                (Some(b), Some(a)) => {
                    let db = t - sorted[b];
                    let da = sorted[a] - t;
                    if db < da || (db == da && matching.tie == TieBreak::Earlier) {
                        Some(b)
                    } else {
                        Some(a)
                    }
                }
            }?;

            let offset = (sorted[pick] - t).abs();
            match matching.tolerance_seconds {
                Some(tol) if offset > tol => None,
                _ => Some(order[pick]),
            }
        })
        .collect()
}

/// Reindex `source` onto `target_times` by nearest time.
///
/// Targets with no source time inside the tolerance get missing values.
pub fn reindex_nearest(
    source: &Dataset,
    target_times: &[i64],
    matching: &TimeMatching,
) -> Result<(Dataset, AlignmentReport), DatasetError> {
    if source.time.is_empty() {
        return Err(DatasetError::EmptyTimeCoordinate("alignment source".to_string()));
    }
    source.validate()?;

    let rows = nearest_rows(&source.time.values, target_times, matching);
    let offsets = rows
        .iter()
        .zip(target_times)
        .filter_map(|(row, &t)| row.map(|i| (source.time.values[i] - t).abs()));
    let report = AlignmentReport::from_rows(&rows, offsets);
    debug!(
        "Nearest-time alignment: {} matched, {} unmatched, max offset {} s",
        report.matched, report.unmatched, report.max_offset_seconds
    );

    let aligned = source.take_time_rows(target_times.to_vec(), &rows)?;
    Ok((aligned, report))
}

/// Reindex `source` onto `target` by equal `CAST` numbers.
///
/// Both datasets must carry a numeric `CAST` variable. A repeated cast number
/// in the source resolves to its first occurrence.
pub fn reindex_by_cast(
    source: &Dataset,
    target: &Dataset,
) -> Result<(Dataset, AlignmentReport), DatasetError> {
    if source.time.is_empty() {
        return Err(DatasetError::EmptyTimeCoordinate("alignment source".to_string()));
    }
    source.validate()?;

    let cast_values = |ds: &Dataset| -> Result<Vec<f64>, DatasetError> {
        ds.variable(CAST)
            .filter(|v| !v.is_profile())
            .and_then(|v| v.values.as_float())
            .map(<[f64]>::to_vec)
            .ok_or_else(|| DatasetError::VariableNotFound(CAST.to_string()))
    };
    let source_casts = cast_values(source)?;
    let target_casts = cast_values(target)?;

    let mut by_cast: HashMap<u64, usize> = HashMap::new();
    for (i, cast) in source_casts.iter().enumerate() {
        if cast.is_finite() {
            by_cast.entry(cast.to_bits()).or_insert(i);
        }
    }

    let rows: Vec<Option<usize>> = target_casts
        .iter()
        .map(|cast| by_cast.get(&cast.to_bits()).copied())
        .collect();
    let offsets = rows
        .iter()
        .zip(&target.time.values)
        .filter_map(|(row, &t)| row.map(|i| (source.time.values[i] - t).abs()));
    let report = AlignmentReport::from_rows(&rows, offsets);
    debug!(
        "Cast-number alignment: {} matched, {} unmatched",
        report.matched, report.unmatched
    );

    let aligned = source.take_time_rows(target.time.values.clone(), &rows)?;
    Ok((aligned, report))
}
