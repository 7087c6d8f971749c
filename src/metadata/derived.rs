use chrono::Utc;

use crate::config::CruiseInfo;
use crate::dataset::{seconds_to_datetime, Attributes, Dataset};
use crate::discovery::CruiseId;
use crate::schema::{LATITUDE, LONGITUDE};

use super::ATTRIBUTE_ORDER;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Attach the configured identity of a cruise.
///
/// `project_id` is always the cruise id; the other keys are only set when
/// configured.
pub fn apply_cruise_attributes(attrs: &mut Attributes, cruise: &CruiseId, info: Option<&CruiseInfo>) {
    attrs.set("project_id", cruise.as_str());
    let Some(info) = info else {
        return;
    };
    if let Some(ship) = &info.ship {
        attrs.set("platform", ship.as_str());
    }
    if let Some(cruise_id) = &info.cruise_id {
        attrs.set("cruise_id", cruise_id.as_str());
    }
    if let Some(start) = info.start_date {
        attrs.set("time_cruise_start", start.format(DATE_FORMAT).to_string());
    }
    if let Some(end) = info.end_date {
        attrs.set("time_cruise_end", end.format(DATE_FORMAT).to_string());
    }
    if let Some(sections) = &info.sections {
        attrs.set("sections", sections.as_str());
    }
}

fn set_or_remove(attrs: &mut Attributes, min_key: &str, max_key: &str, range: Option<(f64, f64)>) {
    match range {
        Some((lo, hi)) => {
            attrs.set(min_key, lo);
            attrs.set(max_key, hi);
        }
        None => {
            attrs.remove(min_key);
            attrs.remove(max_key);
        }
    }
}

/// Recompute latitude, longitude and vertical bounds from the data.
///
/// Bounds with no finite data are removed.
pub fn apply_geospatial_bounds(dataset: &mut Dataset) {
    let lat = dataset.float_range(LATITUDE);
    let lon = dataset.float_range(LONGITUDE);
    let depth = dataset.depth_range();
    let attrs = &mut dataset.attrs;
    set_or_remove(attrs, "geospatial_lat_min", "geospatial_lat_max", lat);
    set_or_remove(attrs, "geospatial_lon_min", "geospatial_lon_max", lon);
    set_or_remove(attrs, "geospatial_vertical_min", "geospatial_vertical_max", depth);
}

/// Set `time_cruise_start`/`time_cruise_end` (YYYY-MM-DD) from the time
/// coordinate
pub fn apply_time_extent(dataset: &mut Dataset) {
    let Some((start, end)) = dataset.time_range() else {
        return;
    };
    if let (Some(start), Some(end)) = (seconds_to_datetime(start), seconds_to_datetime(end)) {
        dataset
            .attrs
            .set("time_cruise_start", start.format(DATE_FORMAT).to_string());
        dataset
            .attrs
            .set("time_cruise_end", end.format(DATE_FORMAT).to_string());
    }
}

/// Set `date_created` to the current UTC time
pub fn stamp_date_created(attrs: &mut Attributes) {
    attrs.set("date_created", Utc::now().format(TIMESTAMP_FORMAT).to_string());
}

/// Sort attributes into the canonical order
pub fn order_attributes(attrs: &mut Attributes) {
    attrs.reorder(ATTRIBUTE_ORDER);
}
