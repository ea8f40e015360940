//! Cytokit experiment configuration
//!
//! Generates the YAML config Cytokit runs from, either from a dataset
//! manifest or directly from a CODEX Toolkit experiment file.

mod builder;
mod config;
mod defaults;

pub use builder::CytokitConfigBuilder;
pub use config::{
    AggregateCytometryStatistics, AnalysisStep, ChannelSelection, CytokitConfig, Cytometry,
    Deconvolution, Environment, Processor, ProcessorArgs, QuantificationParams,
    SegmentationParams, TileGenerator,
};
pub use defaults::{AnalysisDefaults, CytokitDefaults, CytometryDefaults, ProcessorDefaults};

/// Default output file name for generated configs
pub const DEFAULT_CONFIG_FILE: &str = "experiment.yaml";
