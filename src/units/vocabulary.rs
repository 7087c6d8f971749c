use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{read_config_file, ConfigError};
use crate::schema::{DATETIME, DEPTH, LATITUDE, LONGITUDE};

/// One unit conversion: multiply by `factor`, relabel as `units_name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRule {
    /// Multiplicative factor
    pub factor: f64,
    /// Target unit name
    pub units_name: String,
}

impl ConversionRule {
    /// Create a rule
    pub fn new(factor: f64, units_name: impl Into<String>) -> Self {
        Self {
            factor,
            units_name: units_name.into(),
        }
    }
}

/// Unit and naming vocabulary applied when datasets are loaded.
///
/// ```toml
/// preferred_units = ["m/s", "degree_C"]
///
/// [unit_conversion."cm/s"]
/// factor = 0.01
/// units_name = "m/s"
///
/// [variable_names]
/// latitude = "LATITUDE"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Units left untouched
    pub preferred_units: BTreeSet<String>,
    /// Source unit to conversion rule
    pub unit_conversion: BTreeMap<String, ConversionRule>,
    /// Source variable name to canonical name
    pub variable_names: BTreeMap<String, String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let preferred_units = [
            "m/s",
            "degree_C",
            "dbar",
            "1e-3",
            "m",
            "degrees_north",
            "degrees_east",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let unit_conversion = [
            ("cm/s", ConversionRule::new(0.01, "m/s")),
            ("mm/s", ConversionRule::new(0.001, "m/s")),
            ("degrees_Celsius", ConversionRule::new(1.0, "degree_C")),
            ("decibar", ConversionRule::new(1.0, "dbar")),
            ("PSU", ConversionRule::new(1.0, "1e-3")),
            ("psu", ConversionRule::new(1.0, "1e-3")),
        ]
        .into_iter()
        .map(|(unit, rule)| (unit.to_string(), rule))
        .collect();

        let variable_names = [
            ("latitude", LATITUDE),
            ("longitude", LONGITUDE),
            ("time", DATETIME),
            ("depth", DEPTH),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        Self {
            preferred_units,
            unit_conversion,
            variable_names,
        }
    }
}

impl Vocabulary {
    /// A vocabulary with no units, rules, or renames
    pub fn empty() -> Self {
        Self {
            preferred_units: BTreeSet::new(),
            unit_conversion: BTreeMap::new(),
            variable_names: BTreeMap::new(),
        }
    }

    /// Builder-style preferred unit
    pub fn with_preferred(mut self, unit: impl Into<String>) -> Self {
        self.preferred_units.insert(unit.into());
        self
    }

    /// Builder-style conversion rule
    pub fn with_rule(mut self, unit: impl Into<String>, factor: f64, target: impl Into<String>) -> Self {
        self.unit_conversion
            .insert(unit.into(), ConversionRule::new(factor, target));
        self
    }

    /// Rule for a unit, unless the unit is already preferred
    pub fn rule_for(&self, unit: &str) -> Option<&ConversionRule> {
        if self.preferred_units.contains(unit) {
            return None;
        }
        self.unit_conversion.get(unit)
    }

    /// Load a vocabulary from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_str(&read_config_file(path)?)
    }

    /// Parse a vocabulary from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
