use super::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn mkdirs(root: &Path, dirs: &[&str]) {
    for dir in dirs {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
}

#[test]
fn test_ctd_skips_derived_outputs() {
    let dir = tempdir().unwrap();
    mkdirs(dir.path(), &["cruise1/CTD", "Created_files/CTD"]);

    let found = dir_list_ctd(dir.path(), &DiscoveryConfig::default());
    assert_eq!(found, vec![dir.path().join("cruise1/CTD")]);
}

#[test]
fn test_ctd_skips_dated_derived_outputs() {
    let dir = tempdir().unwrap();
    mkdirs(
        dir.path(),
        &["GC_2020_03/CTD", "GC_2020_03/Created_files_2020/CTD", "old_Created_files/CTD"],
    );

    let found = dir_list_ctd(dir.path(), &DiscoveryConfig::default());
    assert_eq!(found, vec![dir.path().join("GC_2020_03/CTD")]);
}

#[test]
fn test_ctd_sorted_and_nested() {
    let dir = tempdir().unwrap();
    mkdirs(
        dir.path(),
        &[
            "GC_2002_05/CTD",
            "GC_2001_04/CTD",
            "GC_2001_04/CTD/Created_files/CTD",
            "GC_2003_01/notes",
        ],
    );

    let found = dir_list_ctd(dir.path(), &DiscoveryConfig::default());
    assert_eq!(
        found,
        vec![
            dir.path().join("GC_2001_04/CTD"),
            dir.path().join("GC_2002_05/CTD"),
        ]
    );
}

#[test]
fn test_adcp_excludes_cruise() {
    let dir = tempdir().unwrap();
    mkdirs(
        dir.path(),
        &[
            "GC_2019_12_AB1912/FINAL_ADCP_PRODUCTS/ladcp_velfiles",
            "GC_2020_02_AB2002/FINAL_ADCP_PRODUCTS/LADCP_velfiles",
            "GC_2018_06/ladcp_velfiles",
        ],
    );

    let found = dir_list_adcp(dir.path(), &DiscoveryConfig::default());
    assert_eq!(
        found,
        vec![
            dir.path().join("GC_2018_06/ladcp_velfiles"),
            dir.path().join("GC_2020_02_AB2002/FINAL_ADCP_PRODUCTS/LADCP_velfiles"),
        ]
    );
}

#[test]
fn test_missing_root_is_empty() {
    let config = DiscoveryConfig::default();
    let root = Path::new("/nonexistent/wbts/root");
    assert!(dir_list_ctd(root, &config).is_empty());
    assert!(dir_list_adcp(root, &config).is_empty());
}

#[test]
fn test_custom_markers() {
    let dir = tempdir().unwrap();
    mkdirs(dir.path(), &["GC_2001_04/ctd_casts", "GC_2001_04/CTD"]);

    let config = DiscoveryConfig {
        ctd_marker: "ctd_casts".to_string(),
        ..Default::default()
    };
    assert_eq!(
        dir_list_ctd(dir.path(), &config),
        vec![dir.path().join("GC_2001_04/ctd_casts")]
    );
}

#[test]
fn test_cruise_id_from_path() {
    let id = CruiseId::from_path(Path::new("/data/GC_2001_04_AB0104/CTD")).unwrap();
    assert_eq!(id.as_str(), "GC_2001_04");
    assert_eq!(id.year_month(), "2001_04");
    assert_eq!(id.to_string(), "GC_2001_04");

    assert!(CruiseId::from_path(Path::new("/data/cruise1/CTD")).is_none());
}

#[test]
fn test_pair_cruise_inputs() {
    let ctd: Vec<PathBuf> = vec![
        "/d/GC_2001_04_X/CTD".into(),
        "/d/GC_2002_05/CTD".into(),
        "/d/cruise1/CTD".into(),
    ];
    let adcp: Vec<PathBuf> = vec!["/d/GC_2001_04_X/FINAL_ADCP_PRODUCTS/ladcp_velfiles".into()];

    let pairs = pair_cruise_inputs(&ctd, &adcp);
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].cruise, CruiseId::new("GC_2001_04"));
    assert_eq!(pairs[0].adcp_dir, Some(adcp[0].clone()));
    assert_eq!(pairs[1].cruise, CruiseId::new("GC_2002_05"));
    assert!(pairs[1].adcp_dir.is_none());
}

#[test]
fn test_discover_cruises() {
    let dir = tempdir().unwrap();
    mkdirs(
        dir.path(),
        &[
            "GC_2001_04/CTD",
            "GC_2001_04/FINAL_ADCP_PRODUCTS/ladcp_velfiles",
            "GC_2019_12/CTD",
            "GC_2019_12/FINAL_ADCP_PRODUCTS/ladcp_velfiles",
        ],
    );

    let cruises = discover_cruises(dir.path(), &DiscoveryConfig::default());
    assert_eq!(cruises.len(), 2);
    assert!(cruises[0].adcp_dir.is_some());
    // excluded from the velocity walk only
    assert_eq!(cruises[1].cruise.as_str(), "GC_2019_12");
    assert!(cruises[1].adcp_dir.is_none());
}
