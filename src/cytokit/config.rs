//! Cytokit experiment configuration structure
//!
//! Field order follows the Cytokit example configs so the YAML output
//! reads the same way.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::acquisition::Acquisition;
use crate::errors::PrepResult;

/// A complete Cytokit experiment config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CytokitConfig {
    pub name: String,
    pub date: String,
    pub environment: Environment,
    pub acquisition: Acquisition,
    pub processor: Processor,
    pub analysis: Vec<AnalysisStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Raw data naming convention, e.g. keyence_multi_cycle_v01
    pub path_formats: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processor {
    pub args: ProcessorArgs,
    pub deconvolution: Deconvolution,
    pub tile_generator: TileGenerator,
    pub best_focus: ChannelSelection,
    pub drift_compensation: ChannelSelection,
    pub cytometry: Cytometry,
}

/// Which processing steps to run and where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorArgs {
    pub gpus: Vec<u32>,
    pub run_crop: bool,
    pub run_tile_generator: bool,
    pub run_drift_comp: bool,
    pub run_cytometry: bool,
    pub run_best_focus: bool,
    pub run_deconvolution: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deconvolution {
    pub n_iter: u32,
    pub scale_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGenerator {
    pub raw_file_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSelection {
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cytometry {
    pub target_shape: [u64; 2],
    pub nuclei_channel_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub membrane_channel_name: Option<String>,
    pub segmentation_params: SegmentationParams,
    pub quantification_params: QuantificationParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationParams {
    pub memb_min_dist: u32,
    pub memb_sigma: u32,
    pub memb_gamma: f64,
    pub marker_dilation: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantificationParams {
    pub nucleus_intensity: bool,
    pub cell_graph: bool,
}

/// One entry of the `analysis` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStep {
    pub aggregate_cytometry_statistics: AggregateCytometryStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateCytometryStatistics {
    pub mode: String,
}

impl CytokitConfig {
    /// Render the config as YAML
    pub fn to_yaml(&self) -> PrepResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the config to a YAML file
    pub fn write_yaml<P: AsRef<Path>>(&self, path: P) -> PrepResult<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        serde_yaml::to_writer(writer, self)?;
        info!("Cytokit config written to {}", path.display());
        Ok(())
    }
}
