//! # Global Attributes
//!
//! CF/ACDD-style global attributes of merged files.
//!
//! ## Attribute Sources
//!
//! 1. **Project**: built-in project attributes overlaid with the configured
//!    `[attributes]` table
//!
//! 2. **Cruise identity**: `project_id`, `platform`, cruise dates and sections
//!    from the `[cruises.<id>]` table
//!
//! 3. **Data-derived**: geospatial bounds and time extent, recomputed on every
//!    merge
//!
//! 4. **Provenance**: `date_created`
//!
//! Attributes are finally sorted by [`ATTRIBUTE_ORDER`].

mod attributes;
mod derived;


pub use attributes::{
    default_project_attributes, project_attributes, InstrumentSet, ARCHIVE_SECTIONS,
    ATTRIBUTE_ORDER,
};
pub use derived::{
    apply_cruise_attributes, apply_geospatial_bounds, apply_time_extent, order_attributes,
    stamp_date_created,
};
