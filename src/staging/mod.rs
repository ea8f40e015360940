//! Raw data staging
//!
//! Cytokit expects raw data laid out in its `keyence_multi_cycle_v01`
//! naming convention. Submitted datasets are close to it but not exact, so
//! an analysis directory is built whose `data/` subdirectory holds symlinks
//! to the raw TIFF files under corrected names.

mod patterns;
mod plan;
#[cfg(test)]
mod tests;

pub use patterns::{is_raw_data_file, link_file_name, parse_raw_data_dir};
pub use plan::{CycleRegionSource, StagingPlan, StagingReport};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::PrepResult;

/// Subdirectory holding the symlinked raw data
pub const DATA_DIR: &str = "data";
/// Subdirectory Cytokit writes results to
pub const OUTPUT_DIR: &str = "output";

#[derive(Deserialize)]
struct StagingManifest {
    #[serde(alias = "rawDataLocation")]
    raw_data_location: PathBuf,
}

/// Read the raw data location from a dataset manifest
///
/// Only the location is needed here, so manifests written by older tools
/// with fewer fields are accepted too.
pub fn read_raw_data_location<P: AsRef<Path>>(manifest_path: P) -> PrepResult<PathBuf> {
    let text = fs::read_to_string(manifest_path.as_ref())?;
    let manifest: StagingManifest = serde_json::from_str(&text)?;
    Ok(manifest.raw_data_location)
}
