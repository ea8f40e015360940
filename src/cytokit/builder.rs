//! Cytokit config assembly

use log::{info, warn};

use crate::acquisition::Acquisition;
use crate::channels::infer_nuclei_channel;
use crate::document::ConfigDocument;
use crate::errors::PrepResult;
use crate::manifest::DatasetManifest;

use super::config::{
    AggregateCytometryStatistics, AnalysisStep, ChannelSelection, CytokitConfig, Cytometry,
    Processor,
};
use super::defaults::CytokitDefaults;

/// Channels the processor section refers to
struct ProcessorChannels {
    nuclei: String,
    membrane: Option<String>,
    best_focus: String,
    drift_compensation: String,
}

/// Builds `CytokitConfig` values from either input format
pub struct CytokitConfigBuilder {
    defaults: CytokitDefaults,
}

impl CytokitConfigBuilder {
    /// Create a builder with the given defaults
    pub fn new(defaults: CytokitDefaults) -> Self {
        CytokitConfigBuilder { defaults }
    }

    /// Build a config from a dataset manifest
    ///
    /// Focus and drift reference channels fall back to the nuclei channel
    /// when the manifest does not name them.
    pub fn from_manifest(&self, manifest: &DatasetManifest) -> PrepResult<CytokitConfig> {
        let nuclei = manifest.nuclei_channel.clone();
        let best_focus = manifest.best_focus.clone().unwrap_or_else(|| {
            warn!("No best focus channel in manifest, using {}", nuclei);
            nuclei.clone()
        });
        let drift_compensation = manifest.drift_compensation.clone().unwrap_or_else(|| {
            warn!("No drift compensation channel in manifest, using {}", nuclei);
            nuclei.clone()
        });

        let channels = ProcessorChannels {
            nuclei,
            membrane: manifest.membrane_channel.clone(),
            best_focus,
            drift_compensation,
        };

        self.assemble(
            manifest.name.clone(),
            manifest.date.clone(),
            manifest.acquisition.clone(),
            channels,
        )
    }

    /// Build a config straight from a CODEX Toolkit experiment file
    ///
    /// The nuclei channel is guessed from the channel names and also used
    /// for best focus and drift compensation.
    ///
    /// # Arguments
    /// * `experiment` - Parsed experiment.json
    /// * `channel_names` - Full channel list, cycle after cycle
    pub fn from_experiment(
        &self,
        experiment: &ConfigDocument,
        channel_names: &[String],
    ) -> PrepResult<CytokitConfig> {
        let name = experiment.collect_string(&["name"])?;
        let date = experiment.collect_string(&["date", "dateProcessed"])?;

        info!("Populating acquisition section...");
        let acquisition = Acquisition::from_experiment(experiment, channel_names)?;
        info!("Acquisition section complete.");

        let nuclei = infer_nuclei_channel(&acquisition.channel_names, acquisition.channels_per_cycle())?;
        info!("Inferred nuclei channel: {}", nuclei);

        let channels = ProcessorChannels {
            best_focus: nuclei.clone(),
            drift_compensation: nuclei.clone(),
            membrane: None,
            nuclei,
        };

        self.assemble(name, date, acquisition, channels)
    }

    fn assemble(
        &self,
        name: String,
        date: String,
        acquisition: Acquisition,
        channels: ProcessorChannels,
    ) -> PrepResult<CytokitConfig> {
        let defaults = &self.defaults;
        let target_shape = acquisition.target_shape()?;

        let processor = Processor {
            args: defaults.processor.args.clone(),
            deconvolution: defaults.processor.deconvolution.clone(),
            tile_generator: defaults.processor.tile_generator.clone(),
            best_focus: ChannelSelection {
                channel: channels.best_focus,
            },
            drift_compensation: ChannelSelection {
                channel: channels.drift_compensation,
            },
            cytometry: Cytometry {
                target_shape,
                nuclei_channel_name: channels.nuclei,
                membrane_channel_name: channels.membrane,
                segmentation_params: defaults.processor.cytometry.segmentation_params.clone(),
                quantification_params: defaults.processor.cytometry.quantification_params.clone(),
            },
        };

        Ok(CytokitConfig {
            name,
            date,
            environment: defaults.environment.clone(),
            acquisition,
            processor,
            analysis: vec![AnalysisStep {
                aggregate_cytometry_statistics: AggregateCytometryStatistics {
                    mode: defaults.analysis.aggregate_cytometry_statistics_mode.clone(),
                },
            }],
        })
    }
}

impl Default for CytokitConfigBuilder {
    fn default() -> Self {
        CytokitConfigBuilder::new(CytokitDefaults::builtin())
    }
}
