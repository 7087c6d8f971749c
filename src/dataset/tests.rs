use super::*;
use crate::schema::{CAST, DEPTH, GC_STRING, LATITUDE, TEMP, U_VELOCITY};

fn cast(times: Vec<i64>, depth: Vec<f64>, temp: Vec<f64>) -> Dataset {
    let n = times.len();
    let mut ds = Dataset::new(times);
    ds.add_coordinate(Coordinate::new(DEPTH, depth));
    ds.add_variable(Variable::time_series(LATITUDE, vec![26.5; n]));
    ds.add_variable(Variable::profile(TEMP, DEPTH, temp).with_attr("units", "degree_C"));
    ds
}

// ==================== Attributes ====================

#[test]
fn test_attributes_preserve_insertion_order() {
    let mut attrs = Attributes::new();
    attrs.set("title", "CTD data");
    attrs.set("project", "Western Boundary Time Series");
    attrs.set("title", "CTD and LADCP data");

    let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["title", "project"]);
    assert_eq!(attrs.get_str("title"), Some("CTD and LADCP data"));
}

#[test]
fn test_attributes_reorder() {
    let mut attrs: Attributes = [("c", "3"), ("a", "1"), ("x", "9"), ("b", "2")]
        .into_iter()
        .collect();
    attrs.reorder(&["a", "b", "c"]);

    let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a", "b", "c", "x"]);
}

#[test]
fn test_attr_value_json_is_untagged() {
    let attrs: Attributes = [
        ("title", AttrValue::from("x")),
        ("geospatial_lat_min", AttrValue::from(26.5)),
    ]
    .into_iter()
    .collect();
    let json = serde_json::to_string(&attrs).unwrap();
    assert_eq!(json, r#"[["title","x"],["geospatial_lat_min",26.5]]"#);

    let back: Attributes = serde_json::from_str(&json).unwrap();
    assert_eq!(back, attrs);
}

// ==================== Dataset ====================

#[test]
fn test_validate_detects_shape_mismatch() {
    let mut ds = cast(vec![0, 60], vec![0.0, 10.0], vec![20.0; 4]);
    assert!(ds.validate().is_ok());

    ds.add_variable(Variable::profile(TEMP, DEPTH, vec![20.0; 3]));
    assert!(matches!(
        ds.validate(),
        Err(DatasetError::ShapeMismatch { expected: 4, found: 3, .. })
    ));
}

#[test]
fn test_validate_detects_unknown_dimension() {
    let mut ds = Dataset::new(vec![0]);
    ds.add_variable(Variable::profile(U_VELOCITY, "DEPTH_LADCP", vec![0.1]));
    assert!(matches!(
        ds.validate(),
        Err(DatasetError::UnknownDimension { .. })
    ));
}

#[test]
fn test_rename_coordinate_updates_dimensions() {
    let mut ds = cast(vec![0], vec![0.0, 10.0], vec![20.0, 19.0]);
    assert!(ds.rename(DEPTH, "DEPTH_LADCP"));

    assert!(ds.coordinate(DEPTH).is_none());
    assert!(ds.coordinate("DEPTH_LADCP").is_some());
    assert_eq!(ds.variable(TEMP).unwrap().depth_dim.as_deref(), Some("DEPTH_LADCP"));
    assert!(ds.validate().is_ok());

    // refuses to clobber an existing name
    assert!(!ds.rename(TEMP, LATITUDE));
}

#[test]
fn test_ranges_ignore_nan() {
    let ds = cast(vec![0, 60], vec![5.0, 10.0], vec![20.0, f64::NAN, 18.0, 17.0]);
    assert_eq!(ds.float_range(TEMP), Some((17.0, 20.0)));
    assert_eq!(ds.depth_range(), Some((5.0, 10.0)));
    assert_eq!(ds.time_range(), Some((0, 60)));
}

#[test]
fn test_sort_by_time_is_stable() {
    let mut ds = cast(vec![60, 0, 60], vec![0.0], vec![1.0, 2.0, 3.0]);
    ds.sort_by_time().unwrap();

    assert_eq!(ds.time.values, vec![0, 60, 60]);
    assert_eq!(ds.variable(TEMP).unwrap().values.as_float().unwrap(), &[2.0, 1.0, 3.0]);
}

#[test]
fn test_seconds_datetime_conversion() {
    let dt = seconds_to_datetime(988_243_200).unwrap();
    assert_eq!(dt.format("%Y-%m-%d").to_string(), "2001-04-26");
    assert_eq!(datetime_to_seconds(dt), 988_243_200);
}

// ==================== Concatenation ====================

#[test]
fn test_concat_identical_grids() {
    let a = cast(vec![0, 60], vec![0.0, 10.0], vec![1.0, 2.0, 3.0, 4.0]);
    let b = cast(vec![120], vec![0.0, 10.0], vec![5.0, 6.0]);
    let merged = concat_time(&[a, b]).unwrap();

    assert_eq!(merged.time.values, vec![0, 60, 120]);
    assert_eq!(
        merged.variable(TEMP).unwrap().values.as_float().unwrap(),
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
    );
    assert!(merged.validate().is_ok());
}

#[test]
fn test_concat_outer_joins_depth() {
    let a = cast(vec![0], vec![0.0, 10.0], vec![1.0, 2.0]);
    let b = cast(vec![60], vec![10.0, 20.0], vec![3.0, 4.0]);
    let merged = concat_time(&[a, b]).unwrap();

    assert_eq!(merged.coordinate(DEPTH).unwrap().values, vec![0.0, 10.0, 20.0]);
    let temp = merged.variable(TEMP).unwrap().values.as_float().unwrap();
    assert_eq!(&temp[0..2], &[1.0, 2.0]);
    assert!(temp[2].is_nan());
    assert!(temp[3].is_nan());
    assert_eq!(&temp[4..6], &[3.0, 4.0]);
}

#[test]
fn test_concat_fills_missing_variables() {
    let mut a = cast(vec![0], vec![0.0], vec![1.0]);
    a.add_variable(Variable::text(GC_STRING, vec!["GC_2001_04".to_string()]));
    let b = cast(vec![60, 120], vec![0.0], vec![2.0, 3.0]);
    let merged = concat_time(&[a, b]).unwrap();

    let labels = merged.variable(GC_STRING).unwrap().values.as_text().unwrap();
    assert_eq!(labels, &["GC_2001_04".to_string(), String::new(), String::new()]);
}

#[test]
fn test_concat_rejects_incompatible_variables() {
    let a = cast(vec![0], vec![0.0], vec![1.0]);
    let mut b = Dataset::new(vec![60]);
    b.add_variable(Variable::text(TEMP, vec!["warm".to_string()]));
    assert!(matches!(
        concat_time(&[a, b]),
        Err(DatasetError::IncompatibleVariable(_))
    ));
}

#[test]
fn test_concat_empty_input() {
    assert!(matches!(
        concat_time(&[]),
        Err(DatasetError::NothingToConcatenate)
    ));
}

// ==================== Reindexing ====================

fn velocity(times: Vec<i64>) -> Dataset {
    let n = times.len();
    let mut ds = Dataset::new(times);
    ds.add_coordinate(Coordinate::new("DEPTH_LADCP", vec![0.0]));
    let values = (0..n).map(|i| i as f64).collect();
    ds.add_variable(Variable::profile(U_VELOCITY, "DEPTH_LADCP", values));
    ds
}

#[test]
fn test_nearest_picks_closest() {
    let source = velocity(vec![0, 1000, 5000]);
    let (aligned, report) =
        reindex_nearest(&source, &[900, 4000], &TimeMatching::default()).unwrap();

    assert_eq!(aligned.time.values, vec![900, 4000]);
    assert_eq!(
        aligned.variable(U_VELOCITY).unwrap().values.as_float().unwrap(),
        &[1.0, 2.0]
    );
    assert_eq!(report.matched, 2);
    assert_eq!(report.max_offset_seconds, 1000);
}

#[test]
fn test_nearest_tie_break() {
    let source = velocity(vec![0, 200]);

    let earlier = nearest_rows(&source.time.values, &[100], &TimeMatching::default());
    assert_eq!(earlier, vec![Some(0)]);

    let later = nearest_rows(
        &source.time.values,
        &[100],
        &TimeMatching::default().with_tie(TieBreak::Later),
    );
    assert_eq!(later, vec![Some(1)]);
}

#[test]
fn test_nearest_beyond_tolerance_is_nan() {
    let source = velocity(vec![0]);
    let (aligned, report) =
        reindex_nearest(&source, &[7200, 7201], &TimeMatching::default()).unwrap();

    let u = aligned.variable(U_VELOCITY).unwrap().values.as_float().unwrap();
    assert_eq!(u[0], 0.0);
    assert!(u[1].is_nan());
    assert_eq!(report.unmatched, 1);
    assert_eq!(report.matched_rows, vec![true, false]);
    assert_eq!(report.time_flags(), vec![1.0, 0.0]);

    let unbounded = nearest_rows(&[0], &[1_000_000], &TimeMatching::unbounded());
    assert_eq!(unbounded, vec![Some(0)]);
}

#[test]
fn test_nearest_unsorted_source_and_duplicates() {
    let rows = nearest_rows(&[500, 100, 100], &[120, 480], &TimeMatching::default());
    assert_eq!(rows, vec![Some(1), Some(0)]);
}

#[test]
fn test_nearest_empty_source_is_error() {
    let source = velocity(vec![]);
    assert!(matches!(
        reindex_nearest(&source, &[0], &TimeMatching::default()),
        Err(DatasetError::EmptyTimeCoordinate(_))
    ));
}

#[test]
fn test_reindex_by_cast() {
    let mut source = velocity(vec![10, 20, 30]);
    source.add_variable(Variable::time_series(CAST, vec![3.0, 1.0, 2.0]));
    let mut target = cast(vec![0, 100], vec![0.0], vec![1.0, 2.0]);
    target.add_variable(Variable::time_series(CAST, vec![1.0, 4.0]));

    let (aligned, report) = AlignmentPolicy::CastNumber.align(&source, &target).unwrap();
    let u = aligned.variable(U_VELOCITY).unwrap().values.as_float().unwrap();
    assert_eq!(u[0], 1.0);
    assert!(u[1].is_nan());
    assert_eq!(report.matched, 1);
    assert_eq!(aligned.time.values, vec![0, 100]);
}

#[test]
fn test_reindex_by_cast_requires_cast_variable() {
    let source = velocity(vec![10]);
    let target = cast(vec![0], vec![0.0], vec![1.0]);
    assert!(matches!(
        reindex_by_cast(&source, &target),
        Err(DatasetError::VariableNotFound(_))
    ));
}

#[test]
fn test_alignment_policy_default_is_nearest() {
    assert_eq!(
        AlignmentPolicy::default(),
        AlignmentPolicy::Nearest(TimeMatching {
            tolerance_seconds: Some(DEFAULT_MATCH_TOLERANCE_SECONDS),
            tie: TieBreak::Earlier,
        })
    );
}
