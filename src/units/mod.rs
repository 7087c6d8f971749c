//! # Unit Normalizer
//!
//! Brings heterogeneous source files onto one set of physical units.
//!
//! | Source unit | Factor | Target |
//! |-------------|--------|--------|
//! | cm/s | 0.01 | m/s |
//! | mm/s | 0.001 | m/s |
//! | degrees_Celsius | 1 | degree_C |
//! | decibar | 1 | dbar |
//! | PSU, psu | 1 | 1e-3 |
//!
//! Conversion is a whitelist: a unit is touched only if it is a rule key and
//! not a preferred unit. Rules whose target is preferred make normalization
//! idempotent.
//!
//! ```rust
//! use wbts::dataset::{Dataset, Variable};
//! use wbts::units::{normalize_units, Vocabulary};
//!
//! let mut ds = Dataset::new(vec![0, 1, 2, 3]);
//! ds.add_variable(Variable::time_series("u", vec![1.0, 2.0, 3.0, 4.0]).with_attr("units", "cm/s"));
//!
//! let vocab = Vocabulary::empty().with_rule("cm/s", 0.01, "m/s");
//! let out = normalize_units(&ds, &vocab);
//! assert_eq!(out.variable("u").unwrap().units(), Some("m/s"));
//! ```

mod normalize;
mod vocabulary;


pub use normalize::{normalize_units, normalize_units_in_place, rename_variables};
pub use vocabulary::{ConversionRule, Vocabulary};
