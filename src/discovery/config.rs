use serde::{Deserialize, Serialize};

/// Directory markers used by discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Name of CTD instrument directories
    pub ctd_marker: String,
    /// Substring naming derived-output directories skipped by the CTD walk
    pub derived_marker: String,
    /// Names of ADCP velocity-file directories
    pub velocity_markers: Vec<String>,
    /// Cruise identifiers skipped by the ADCP walk, matched as substrings of
    /// path components
    pub excluded_cruises: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            ctd_marker: "CTD".to_string(),
            derived_marker: "Created_files".to_string(),
            velocity_markers: vec!["ladcp_velfiles".to_string(), "LADCP_velfiles".to_string()],
            excluded_cruises: vec!["2019_12".to_string()],
        }
    }
}
