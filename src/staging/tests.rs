//! Tests for raw data staging

extern crate std;

use std::fs;
use std::path::Path;

use crate::errors::PrepError;
use crate::staging::{
    is_raw_data_file, link_file_name, parse_raw_data_dir, read_raw_data_location, StagingPlan,
};

fn touch(path: &Path) {
    fs::write(path, b"").unwrap();
}

fn raw_dataset(root: &Path) {
    let cyc1 = root.join("cyc001_reg001_191209_123455");
    let cyc2 = root.join("Cyc2_reg1");
    fs::create_dir_all(&cyc1).unwrap();
    fs::create_dir_all(&cyc2).unwrap();
    fs::create_dir_all(root.join("processed")).unwrap();

    touch(&cyc1.join("1_00001_Z001_CH1.tif"));
    touch(&cyc1.join("1_00001_Z001_CH2.tif"));
    touch(&cyc1.join("notes.txt"));
    // Wrong region index in the file name
    touch(&cyc2.join("2_00001_Z001_CH1.tif"));
}

#[test]
fn test_directory_pattern() {
    std::assert_eq!(
        parse_raw_data_dir("cyc001_reg002_191209_123455"),
        Some(("1".to_string(), "2".to_string()))
    );
    std::assert_eq!(parse_raw_data_dir("Cyc10_reg1"), Some(("10".to_string(), "1".to_string())));
    std::assert_eq!(parse_raw_data_dir("processed"), None);
    std::assert_eq!(parse_raw_data_dir("reg1_cyc1"), None);
}

#[test]
fn test_file_pattern() {
    std::assert!(is_raw_data_file("1_00025_Z011_CH4.tif"));
    std::assert!(!is_raw_data_file("1_0025_Z011_CH4.tif"));
    std::assert!(!is_raw_data_file("1_00025_Z011_CH4.tiff"));
    std::assert!(!is_raw_data_file("1_00025_Z011_CH4.tif.bak"));
}

#[test]
fn test_link_name_takes_directory_region() {
    std::assert_eq!(link_file_name("2_00001_Z001_CH1.tif", "1"), "1_00001_Z001_CH1.tif");
    std::assert_eq!(link_file_name("1_00001_Z001_CH1.tif", "1"), "1_00001_Z001_CH1.tif");
}

#[test]
fn test_scan_collects_matching_entries() {
    let dir = tempfile::tempdir().unwrap();
    raw_dataset(dir.path());

    let plan = StagingPlan::scan(dir.path()).unwrap();
    std::assert_eq!(plan.sources.len(), 2);
    std::assert_eq!(plan.sources[0].dir_name, "Cyc2_reg1");
    std::assert_eq!(plan.sources[0].target_dir_name(), "Cyc2_reg1");
    std::assert_eq!(plan.sources[1].target_dir_name(), "Cyc1_reg1");
    std::assert_eq!(plan.sources[1].files.len(), 2);
    std::assert_eq!(plan.link_count(), 3);
}

#[test]
fn test_scan_without_cycle_directories() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("processed")).unwrap();

    let result = StagingPlan::scan(dir.path());
    std::assert!(std::matches!(result, Err(PrepError::StagingError(_))));
}

#[test]
fn test_scan_with_empty_cycle_directory() {
    let dir = tempfile::tempdir().unwrap();
    let cyc = dir.path().join("cyc1_reg1");
    fs::create_dir(&cyc).unwrap();
    touch(&cyc.join("readme.txt"));

    std::assert!(StagingPlan::scan(dir.path()).is_err());
}

#[test]
fn test_scan_rejects_duplicate_cycle_region() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["cyc1_reg1_a", "cyc001_reg001_b"] {
        let cyc = dir.path().join(name);
        fs::create_dir(&cyc).unwrap();
        touch(&cyc.join("1_00001_Z001_CH1.tif"));
    }

    std::assert!(StagingPlan::scan(dir.path()).is_err());
}

#[test]
fn test_scan_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    std::assert!(StagingPlan::scan(dir.path().join("absent")).is_err());
}

#[cfg(unix)]
#[test]
fn test_execute_creates_layout_and_links() {
    let raw = tempfile::tempdir().unwrap();
    raw_dataset(raw.path());
    let work = tempfile::tempdir().unwrap();
    let target = work.path().join("analysis");

    let plan = StagingPlan::scan(raw.path()).unwrap();
    let report = plan.execute(&target).unwrap();

    std::assert_eq!(report.links_created, 3);
    // target, data, output and two cycle/region directories
    std::assert_eq!(report.directories_created.len(), 5);
    std::assert!(target.join("output").is_dir());

    let link = target.join("data").join("Cyc2_reg1").join("1_00001_Z001_CH1.tif");
    let pointed = fs::read_link(&link).unwrap();
    std::assert_eq!(
        pointed,
        plan.raw_data_location.join("Cyc2_reg1").join("2_00001_Z001_CH1.tif")
    );
    std::assert!(pointed.is_absolute());
}

#[test]
fn test_execute_refuses_existing_target() {
    let raw = tempfile::tempdir().unwrap();
    raw_dataset(raw.path());
    let work = tempfile::tempdir().unwrap();

    let plan = StagingPlan::scan(raw.path()).unwrap();
    let result = plan.execute(work.path());
    std::assert!(std::matches!(result, Err(PrepError::StagingError(_))));
}

#[test]
fn test_read_raw_data_location_accepts_both_keys() {
    let dir = tempfile::tempdir().unwrap();

    let current = dir.path().join("current.json");
    fs::write(&current, r#"{"name": "x", "raw_data_location": "/data/raw"}"#).unwrap();
    std::assert_eq!(read_raw_data_location(&current).unwrap(), Path::new("/data/raw"));

    let legacy = dir.path().join("legacy.json");
    fs::write(&legacy, r#"{"rawDataLocation": "/data/old"}"#).unwrap();
    std::assert_eq!(read_raw_data_location(&legacy).unwrap(), Path::new("/data/old"));
}
