//! Default Cytokit processing parameters
//!
//! Defaults live in `cytokit_defaults.toml`, embedded at build time. A
//! different file can be loaded at run time to tune a dataset.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use serde::Deserialize;

use crate::errors::PrepResult;

use super::config::{
    Deconvolution, Environment, ProcessorArgs, QuantificationParams, SegmentationParams,
    TileGenerator,
};

lazy_static! {
    static ref BUILTIN_DEFAULTS: CytokitDefaults = {
        let content = include_str!("../../cytokit_defaults.toml");
        CytokitDefaults::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse built-in Cytokit defaults: {}", e);
            CytokitDefaults::fallback()
        })
    };
}

/// Defaults that are not derived from the experiment
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CytokitDefaults {
    pub environment: Environment,
    pub processor: ProcessorDefaults,
    pub analysis: AnalysisDefaults,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessorDefaults {
    pub args: ProcessorArgs,
    pub deconvolution: Deconvolution,
    pub tile_generator: TileGenerator,
    pub cytometry: CytometryDefaults,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CytometryDefaults {
    pub segmentation_params: SegmentationParams,
    pub quantification_params: QuantificationParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisDefaults {
    pub aggregate_cytometry_statistics_mode: String,
}

impl CytokitDefaults {
    /// Parse defaults from a TOML string
    pub fn from_str(content: &str) -> PrepResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load defaults from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// The defaults shipped with the crate
    pub fn builtin() -> Self {
        BUILTIN_DEFAULTS.clone()
    }

    fn fallback() -> Self {
        CytokitDefaults {
            environment: Environment {
                path_formats: "keyence_multi_cycle_v01".to_string(),
            },
            processor: ProcessorDefaults {
                args: ProcessorArgs {
                    gpus: vec![0, 1],
                    run_crop: true,
                    run_tile_generator: true,
                    run_drift_comp: true,
                    run_cytometry: true,
                    run_best_focus: true,
                    run_deconvolution: true,
                },
                deconvolution: Deconvolution {
                    n_iter: 25,
                    scale_factor: 0.5,
                },
                tile_generator: TileGenerator {
                    raw_file_type: "keyence_mixed".to_string(),
                },
                cytometry: CytometryDefaults {
                    segmentation_params: SegmentationParams {
                        memb_min_dist: 8,
                        memb_sigma: 5,
                        memb_gamma: 0.25,
                        marker_dilation: 3,
                    },
                    quantification_params: QuantificationParams {
                        nucleus_intensity: true,
                        cell_graph: true,
                    },
                },
            },
            analysis: AnalysisDefaults {
                aggregate_cytometry_statistics_mode: "best_z_plane".to_string(),
            },
        }
    }
}

impl Default for CytokitDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}
