pub mod errors;
pub mod document;
pub mod channels;
pub mod acquisition;
pub mod manifest;
pub mod cytokit;
pub mod staging;
pub mod quality;
pub mod utils;
pub mod commands;
pub mod cli;
pub mod api;

pub use crate::api::CodexPrep;

pub use errors::{PrepError, PrepResult};
pub use document::ConfigDocument;
pub use acquisition::Acquisition;
pub use manifest::{DatasetManifest, ManifestBuilder};
pub use cytokit::{CytokitConfig, CytokitConfigBuilder, CytokitDefaults};
pub use staging::{StagingPlan, StagingReport};
pub use quality::{Plane, QualityMetric};
