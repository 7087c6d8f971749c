use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::{dir_list_adcp, dir_list_ctd, DiscoveryConfig};

/// Prefix of cruise directory names
pub const CRUISE_PREFIX: &str = "GC";
const CRUISE_ID_LEN: usize = 10;

/// Cruise identifier of the form `GC_YYYY_MM`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CruiseId(String);

impl CruiseId {
    /// Wrap an identifier as is
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the identifier from a path: the first component starting with
    /// `GC`, truncated to `GC_YYYY_MM`
    pub fn from_path(path: &Path) -> Option<Self> {
        path.components()
            .filter_map(|c| c.as_os_str().to_str())
            .find(|name| name.starts_with(CRUISE_PREFIX))
            .map(|name| Self(name.chars().take(CRUISE_ID_LEN).collect()))
    }

    /// The identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `YYYY_MM` part of the identifier
    pub fn year_month(&self) -> &str {
        self.0.get(3..).unwrap_or("")
    }
}

impl fmt::Display for CruiseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instrument directories of one cruise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CruiseInputs {
    /// Cruise identifier
    pub cruise: CruiseId,
    /// CTD cast directory
    pub ctd_dir: PathBuf,
    /// LADCP velocity directory, if the cruise has one
    pub adcp_dir: Option<PathBuf>,
}

/// Pair each CTD directory with the ADCP directory of the same cruise.
///
/// CTD directories without a cruise identifier are skipped. When a cruise has
/// several ADCP directories the first (sorted) one is used.
pub fn pair_cruise_inputs(ctd_dirs: &[PathBuf], adcp_dirs: &[PathBuf]) -> Vec<CruiseInputs> {
    let mut pairs = Vec::with_capacity(ctd_dirs.len());
    for ctd_dir in ctd_dirs {
        let Some(cruise) = CruiseId::from_path(ctd_dir) else {
            warn!("No cruise identifier in {}, skipping", ctd_dir.display());
            continue;
        };
        let adcp_dir = adcp_dirs
            .iter()
            .find(|dir| CruiseId::from_path(dir).as_ref() == Some(&cruise))
            .cloned();
        pairs.push(CruiseInputs {
            cruise,
            ctd_dir: ctd_dir.clone(),
            adcp_dir,
        });
    }
    pairs
}

/// Discover and pair the instrument directories of every cruise below `root`
pub fn discover_cruises(root: &Path, config: &DiscoveryConfig) -> Vec<CruiseInputs> {
    let ctd_dirs = dir_list_ctd(root, config);
    let adcp_dirs = dir_list_adcp(root, config);
    info!(
        "Found {} CTD and {} LADCP directories under {}",
        ctd_dirs.len(),
        adcp_dirs.len(),
        root.display()
    );
    pair_cruise_inputs(&ctd_dirs, &adcp_dirs)
}
