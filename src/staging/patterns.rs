//! Raw data naming patterns
//!
//! Follows Cytokit's `keyence_multi_cycle_v01` convention (cytokit/io.py).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Cycle/region directories. Submitters use e.g. cyc001_reg001_191209_123455
    // or Cyc1_reg1.
    static ref RAW_DIR: Regex = Regex::new(r"(?i)^cyc0*(\d+)_reg0*(\d+).*").unwrap();

    // <region>_<tile:5>_Z<plane:3>_CH<channel>.tif, all indices 1-based
    static ref RAW_FILE: Regex = Regex::new(r"^\d_\d{5}_Z\d{3}_CH\d\.tif$").unwrap();

    static ref FILE_REGION: Regex = Regex::new(r"^\d").unwrap();
}

/// Parse cycle and region numbers from a raw data directory name
///
/// Leading zeros are dropped: `cyc001_reg002_x` gives `("1", "2")`.
pub fn parse_raw_data_dir(name: &str) -> Option<(String, String)> {
    RAW_DIR
        .captures(name)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Whether a file name follows the raw TIFF naming convention
pub fn is_raw_data_file(name: &str) -> bool {
    RAW_FILE.is_match(name)
}

/// Name of the link for a raw file, with the region index corrected
///
/// Some submissions carry the wrong region number at the start of the
/// file name; the directory's region number is authoritative.
pub fn link_file_name(file_name: &str, region: &str) -> String {
    FILE_REGION.replace(file_name, region).into_owned()
}
