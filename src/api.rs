use std::path::Path;

use log::info;

use crate::channels::resolve_channel_names;
use crate::cytokit::{CytokitConfig, CytokitConfigBuilder, CytokitDefaults};
use crate::document::ConfigDocument;
use crate::errors::PrepResult;
use crate::manifest::{DatasetManifest, ManifestBuilder};
use crate::quality::{FourierSharpness, Plane, QualityMetric};
use crate::staging::{StagingPlan, StagingReport};
use crate::utils::logger::Logger;

/// Main interface to the codexprep library
pub struct CodexPrep {
    logger: Logger,
    defaults: CytokitDefaults,
}

impl CodexPrep {
    /// Create a new CodexPrep instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to an operation log file; nothing is
    ///   recorded when `None`
    ///
    /// # Returns
    /// A CodexPrep instance or an error if the log file cannot be opened
    pub fn new(log_file: Option<&Path>) -> PrepResult<Self> {
        let logger = match log_file {
            Some(path) => Logger::new(path)?,
            None => Logger::disabled(),
        };
        Ok(CodexPrep {
            logger,
            defaults: CytokitDefaults::builtin(),
        })
    }

    /// Use different Cytokit defaults for generated configs
    pub fn with_defaults(mut self, defaults: CytokitDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Collect a dataset manifest and write it as JSON
    ///
    /// # Arguments
    /// * `dataset_id` - Dataset identifier
    /// * `raw_data_location` - Directory with the raw cycle/region directories
    /// * `experiment_json` - experiment.json from the CODEX Toolkit
    /// * `segmentation` - Segmentation parameters document
    /// * `channel_names_file` - Optional file listing all channel names
    /// * `output_path` - Where to write the manifest
    pub fn collect_manifest(
        &self,
        dataset_id: &str,
        raw_data_location: &str,
        experiment_json: &Path,
        segmentation: ConfigDocument,
        channel_names_file: Option<&Path>,
        output_path: &Path,
    ) -> PrepResult<DatasetManifest> {
        let experiment = ConfigDocument::from_json_file(experiment_json)?;
        let manifest = ManifestBuilder::new(dataset_id, raw_data_location, experiment, segmentation)
            .channel_names_file(channel_names_file.map(Path::to_path_buf))
            .build()?;

        manifest.write_json(output_path)?;
        self.logger
            .log(&format!("manifest {} written to {}", dataset_id, output_path.display()))?;
        Ok(manifest)
    }

    /// Generate a Cytokit config from a manifest file
    pub fn cytokit_config_from_manifest(&self, manifest_path: &Path, output_path: &Path) -> PrepResult<CytokitConfig> {
        let manifest = DatasetManifest::load(manifest_path)?;
        let config = CytokitConfigBuilder::new(self.defaults.clone()).from_manifest(&manifest)?;
        self.write_config(&config, output_path)?;
        Ok(config)
    }

    /// Generate a Cytokit config directly from an experiment file
    pub fn cytokit_config_from_experiment(
        &self,
        experiment_json: &Path,
        channel_names_file: Option<&Path>,
        output_path: &Path,
    ) -> PrepResult<CytokitConfig> {
        let experiment = ConfigDocument::from_json_file(experiment_json)?;
        let channel_names = resolve_channel_names(channel_names_file, &experiment)?;
        let config = CytokitConfigBuilder::new(self.defaults.clone())
            .from_experiment(&experiment, &channel_names)?;
        self.write_config(&config, output_path)?;
        Ok(config)
    }

    fn write_config(&self, config: &CytokitConfig, output_path: &Path) -> PrepResult<()> {
        config.write_yaml(output_path)?;
        self.logger.log(&format!(
            "cytokit config for {} written to {}",
            config.name,
            output_path.display()
        ))?;
        Ok(())
    }

    /// Stage raw data from `raw_data_location` into a new analysis directory
    pub fn stage(&self, raw_data_location: &Path, target_dir: &Path) -> PrepResult<StagingReport> {
        let plan = StagingPlan::scan(raw_data_location)?;
        let report = plan.execute(target_dir)?;
        self.logger.log(&format!(
            "staged {} links under {}",
            report.links_created,
            target_dir.display()
        ))?;
        Ok(report)
    }

    /// Fourier sharpness of the first plane of an image file
    pub fn sharpness(&self, image_path: &Path) -> PrepResult<f64> {
        let score = FourierSharpness.score(&Plane::load(image_path)?)?;
        info!("{}: sharpness {}", image_path.display(), score);
        Ok(score)
    }
}
