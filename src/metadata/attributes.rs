use std::collections::BTreeMap;

use crate::dataset::Attributes;

/// Canonical order of global attributes in merged files.
///
/// Attributes not listed follow in insertion order.
pub const ATTRIBUTE_ORDER: &[&str] = &[
    "title",
    "project",
    "project_id",
    "platform",
    "instrument",
    "geospatial_lat_min",
    "geospatial_lat_max",
    "geospatial_lon_min",
    "geospatial_lon_max",
    "geospatial_vertical_min",
    "geospatial_vertical_max",
    "time_cruise_start",
    "time_cruise_end",
    "sections",
    "sections_vocabulary",
    "contributor_CTD",
    "contributor_ADCP",
    "contributor_name",
    "contributor_email",
    "contributor_role",
    "contributing_institutions",
    "data_url",
    "web_link",
    "comment",
    "date_created",
    "featureType",
    "Conventions",
];

/// Sections string of the multi-year archive
pub const ARCHIVE_SECTIONS: &str =
    "Abaco, Northwest Providence Channel and 27N Florida Straits Sections";

/// Built-in project attributes
pub fn default_project_attributes() -> Attributes {
    [
        ("project", "Western Boundary Time Series"),
        ("web_link", "https://www.aoml.noaa.gov/phod/wbts/data.php"),
        ("featureType", "profile"),
        ("Conventions", "CF-1.11"),
    ]
    .into_iter()
    .collect()
}

/// Built-in project attributes overlaid with configured ones
pub fn project_attributes(configured: &BTreeMap<String, String>) -> Attributes {
    let mut attrs = default_project_attributes();
    for (key, value) in configured {
        attrs.set(key.as_str(), value.as_str());
    }
    attrs
}

/// Instruments contributing to a merged file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentSet {
    /// CTD casts only
    Ctd,
    /// CTD casts with LADCP velocities
    CtdLadcp,
}

impl InstrumentSet {
    /// `title` attribute
    pub fn title(&self) -> &'static str {
        match self {
            InstrumentSet::Ctd => "CTD data of the Abaco Cruise",
            InstrumentSet::CtdLadcp => "CTD and LADCP data of the Abaco Cruise",
        }
    }

    /// `instrument` attribute
    pub fn instrument(&self) -> &'static str {
        match self {
            InstrumentSet::Ctd => "CTD",
            InstrumentSet::CtdLadcp => "CTD and Lowered Acoustic Doppler Current Profilers (LADCP)",
        }
    }

    /// Output file suffix
    pub fn file_suffix(&self) -> &'static str {
        match self {
            InstrumentSet::Ctd => "CTD",
            InstrumentSet::CtdLadcp => "CTD_LADCP",
        }
    }
}
