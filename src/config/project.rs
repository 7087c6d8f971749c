use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dataset::AlignmentPolicy;
use crate::discovery::{CruiseId, DiscoveryConfig};
use crate::merge::ArchiveOptions;
use crate::units::Vocabulary;

use super::error::{read_config_file, ConfigError};

/// Identity of one cruise, keyed by its `GC_YYYY_MM` id in [`ProjectConfig`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CruiseInfo {
    /// Ship cruise designation (`AB0104 / OC365-9`)
    pub cruise_id: Option<String>,
    /// Research vessel
    pub ship: Option<String>,
    /// First day of the cruise
    pub start_date: Option<NaiveDate>,
    /// Last day of the cruise
    pub end_date: Option<NaiveDate>,
    /// Occupied sections
    pub sections: Option<String>,
}

/// Project configuration.
///
/// ```toml
/// input_dir = "WBTS_data"
/// output_dir = "WBTS_output"
///
/// [attributes]
/// comment = "Preliminary merge"
///
/// [cruises.GC_2001_04]
/// cruise_id = "AB0104 / OC365-9"
/// ship = "R/V OCEANUS"
/// start_date = "2001-04-26"
/// end_date = "2001-05-07"
/// sections = "Abaco"
///
/// [alignment]
/// policy = "nearest"
/// tolerance_seconds = 3600
/// tie = "later"
/// ```
///
/// Relative directories are resolved against the config file location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Root of the raw cruise tree
    pub input_dir: PathBuf,
    /// Root of the merged outputs (`<output_dir>/Merged`)
    pub output_dir: PathBuf,
    /// Global attributes added to every merged file, over the built-in
    /// project attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Per-cruise identity
    #[serde(default)]
    pub cruises: BTreeMap<String, CruiseInfo>,
    /// Directory discovery markers
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// CTD/LADCP alignment policy
    #[serde(default)]
    pub alignment: AlignmentPolicy,
    /// Unit and naming vocabulary
    #[serde(default)]
    pub vocabulary: Vocabulary,
    /// Cross-year merge options
    #[serde(default)]
    pub archive: ArchiveOptions,
}

impl ProjectConfig {
    /// Configuration with default sections
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            attributes: BTreeMap::new(),
            cruises: BTreeMap::new(),
            discovery: DiscoveryConfig::default(),
            alignment: AlignmentPolicy::default(),
            vocabulary: Vocabulary::default(),
            archive: ArchiveOptions::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_str(&read_config_file(path)?)?;
        if let Some(base) = path.parent() {
            config.input_dir = base.join(&config.input_dir);
            config.output_dir = base.join(&config.output_dir);
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Identity of a cruise, if configured
    pub fn cruise(&self, id: &CruiseId) -> Option<&CruiseInfo> {
        self.cruises.get(id.as_str())
    }

    /// Directory holding per-cruise outputs and the archive
    pub fn merged_dir(&self) -> PathBuf {
        self.output_dir.join(&self.archive.merged_dir_name)
    }
}
