//! # WBTS Dataset Schema
//!
//! This module defines how an in-memory [`Dataset`](crate::dataset::Dataset) is laid
//! out as an Apache Arrow schema and stored in Parquet.
//!
//! ## Layout
//!
//! Every file holds one row per entry of the shared `DATETIME` dimension:
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | DATETIME | Timestamp(s) | Cast or ensemble time (UTC) |
//! | LATITUDE, LONGITUDE, CAST | Float64 | Per-time scalars |
//! | GC_STRING | Utf8 | Cruise label |
//! | TEMP, PSAL, PRES, velocities | `List<Float64>` | One profile per row |
//!
//! Profile columns record their depth dimension in field metadata
//! (`wbts:dimension`). The depth coordinates themselves, and the ordered global
//! attributes, are stored as JSON in the Parquet footer.

mod builders;
/// Variable and coordinate name constants.
pub mod columns;
mod constants;


pub use builders::{
    create_dataset_schema, create_dataset_schema_arc, profile_item_field, variable_data_type,
};
pub use columns::*;
pub use constants::*;
