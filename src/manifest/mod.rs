//! Dataset manifest
//!
//! The manifest collects everything later pipeline steps need to know about
//! one CODEX dataset: where the raw data lives, the acquisition parameters,
//! and which channels to use for focus, drift compensation and segmentation.

mod builder;
#[cfg(test)]
mod tests;

pub use builder::ManifestBuilder;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::acquisition::Acquisition;
use crate::errors::PrepResult;

/// Format of the manifest `date` field
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Summary of one CODEX dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Dataset identifier, e.g. HBM123.ABCD.456
    pub name: String,
    /// When the manifest was collected
    pub date: String,
    /// Directory holding the cycle/region raw data directories
    pub raw_data_location: String,
    #[serde(flatten)]
    pub acquisition: Acquisition,
    pub best_focus: Option<String>,
    pub drift_compensation: Option<String>,
    pub nuclei_channel: String,
    pub membrane_channel: Option<String>,
    pub target_shape: [u64; 2],
}

impl DatasetManifest {
    /// Load a manifest from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the manifest as pretty-printed JSON
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> PrepResult<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        info!("Manifest written to {}", path.display());
        Ok(())
    }

    /// Default output file name for a dataset
    pub fn default_file_name(dataset_id: &str) -> String {
        format!("{}_manifest.json", dataset_id)
    }
}
