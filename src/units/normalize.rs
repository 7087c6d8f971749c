use log::debug;

use crate::dataset::{Dataset, Values};
use crate::schema::ATTR_UNITS;

use super::Vocabulary;

/// Return a copy of `dataset` with units normalized.
///
/// The input is left untouched. See [`normalize_units_in_place`].
pub fn normalize_units(dataset: &Dataset, vocabulary: &Vocabulary) -> Dataset {
    let mut normalized = dataset.clone();
    normalize_units_in_place(&mut normalized, vocabulary);
    normalized
}

/// Normalize units of every data variable, returning how many were converted.
///
/// A variable is converted only when its `units` attribute is not a preferred
/// unit and exactly matches a rule key. Values are multiplied by the rule
/// factor and `units` becomes the rule target. Everything else, including
/// variables without `units`, is left as is.
pub fn normalize_units_in_place(dataset: &mut Dataset, vocabulary: &Vocabulary) -> usize {
    let mut converted = 0;
    for variable in &mut dataset.variables {
        let Some(unit) = variable.attrs.get_str(ATTR_UNITS) else {
            continue;
        };
        let Some(rule) = vocabulary.rule_for(unit) else {
            continue;
        };
        match &mut variable.values {
            Values::Float(values) => {
                debug!(
                    "Converting {} from {} to {} (x{})",
                    variable.name, unit, rule.units_name, rule.factor
                );
                for v in values.iter_mut() {
                    *v *= rule.factor;
                }
                variable.attrs.set(ATTR_UNITS, rule.units_name.as_str());
                converted += 1;
            }
            Values::Text(_) => {
                debug!(
                    "Skipping unit conversion of text variable {} ({})",
                    variable.name, unit
                );
            }
        }
    }
    converted
}

/// Apply the vocabulary rename table to variables and coordinates.
///
/// Returns the number of renames performed. A rename whose target name is
/// already taken is skipped.
pub fn rename_variables(dataset: &mut Dataset, vocabulary: &Vocabulary) -> usize {
    let mut renamed = 0;
    for (from, to) in &vocabulary.variable_names {
        if dataset.rename(from, to) {
            debug!("Renamed {} to {}", from, to);
            renamed += 1;
        }
    }
    renamed
}
