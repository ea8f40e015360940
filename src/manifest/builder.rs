//! Manifest assembly from experiment and segmentation documents

use std::path::PathBuf;

use chrono::Local;
use log::{info, warn};

use crate::acquisition::Acquisition;
use crate::channels::{infer_channel_name_from_index, resolve_channel_names};
use crate::document::ConfigDocument;
use crate::errors::{PrepError, PrepResult};

use super::{DatasetManifest, DATE_FORMAT};

/// Collects a `DatasetManifest`
pub struct ManifestBuilder {
    dataset_id: String,
    raw_data_location: String,
    experiment: ConfigDocument,
    segmentation: ConfigDocument,
    channel_names_file: Option<PathBuf>,
    date: Option<String>,
}

impl ManifestBuilder {
    /// Create a new builder
    ///
    /// # Arguments
    /// * `dataset_id` - Dataset identifier used as the manifest name
    /// * `raw_data_location` - Directory with the raw cycle/region directories
    /// * `experiment` - Parsed experiment.json from the CODEX Toolkit
    /// * `segmentation` - Segmentation parameters (nuclear/membrane stain positions)
    pub fn new(
        dataset_id: &str,
        raw_data_location: &str,
        experiment: ConfigDocument,
        segmentation: ConfigDocument,
    ) -> Self {
        ManifestBuilder {
            dataset_id: dataset_id.to_string(),
            raw_data_location: raw_data_location.to_string(),
            experiment,
            segmentation,
            channel_names_file: None,
            date: None,
        }
    }

    /// Read channel names from a file instead of the experiment document
    pub fn channel_names_file(mut self, path: Option<PathBuf>) -> Self {
        self.channel_names_file = path;
        self
    }

    /// Use a fixed collection date instead of the current time
    pub fn date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    /// Assemble the manifest
    pub fn build(self) -> PrepResult<DatasetManifest> {
        let channel_names = resolve_channel_names(self.channel_names_file.as_deref(), &self.experiment)?;
        let acquisition = Acquisition::from_experiment(&self.experiment, &channel_names)?;
        let per_cycle = acquisition.channels_per_cycle();
        let names = &acquisition.channel_names;

        let best_focus = infer_channel_name_from_index(
            self.experiment.collect_i64(&["bestFocusReferenceCycle"])?,
            self.experiment
                .collect_i64(&["bestFocusReferenceChannel", "best_focus_channel"])?,
            names,
            per_cycle,
        )?;

        let drift_compensation = infer_channel_name_from_index(
            self.experiment.collect_i64(&["driftCompReferenceCycle"])?,
            self.experiment
                .collect_i64(&["driftCompReferenceChannel", "drift_comp_channel"])?,
            names,
            per_cycle,
        )?;

        let nuclei_channel = infer_channel_name_from_index(
            self.segmentation.collect_i64(&["nuclearStainCycle"])?,
            self.segmentation.collect_i64(&["nuclearStainChannel"])?,
            names,
            per_cycle,
        )?
        .ok_or_else(|| PrepError::ChannelInference("No nuclei stain channel found".to_string()))?;

        let membrane_channel = match (
            self.segmentation
                .collect_optional(&["membraneStainCycle", "membrainStainCycle"]),
            self.segmentation.collect_optional(&["membraneStainChannel"]),
        ) {
            (Some(_), Some(_)) => infer_channel_name_from_index(
                self.segmentation
                    .collect_i64(&["membraneStainCycle", "membrainStainCycle"])?,
                self.segmentation.collect_i64(&["membraneStainChannel"])?,
                names,
                per_cycle,
            )?,
            _ => {
                warn!("No membrane stain position in {}", self.segmentation.source);
                None
            }
        };

        let target_shape = acquisition.target_shape()?;

        info!(
            "Nuclei channel: {}, best focus: {}, drift compensation: {}",
            nuclei_channel,
            best_focus.as_deref().unwrap_or("none"),
            drift_compensation.as_deref().unwrap_or("none")
        );

        Ok(DatasetManifest {
            name: self.dataset_id,
            date: self
                .date
                .unwrap_or_else(|| Local::now().format(DATE_FORMAT).to_string()),
            raw_data_location: self.raw_data_location,
            acquisition,
            best_focus,
            drift_compensation,
            nuclei_channel,
            membrane_channel,
            target_shape,
        })
    }
}
