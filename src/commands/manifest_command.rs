//! Dataset manifest collection command

use std::path::PathBuf;

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::commands::required_arg;
use crate::document::ConfigDocument;
use crate::errors::{PrepError, PrepResult};
use crate::manifest::{DatasetManifest, ManifestBuilder};
use crate::utils::logger::Logger;

/// Where the segmentation parameters come from
#[derive(Debug, Clone)]
enum SegmentationSource {
    Json(PathBuf),
    Text(PathBuf),
}

/// Command for collecting a dataset manifest
pub struct ManifestCommand<'a> {
    dataset_id: String,
    raw_data_location: String,
    experiment_file: PathBuf,
    segmentation: SegmentationSource,
    channel_names_file: Option<PathBuf>,
    output_file: PathBuf,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ManifestCommand<'a> {
    /// Create a new manifest command
    ///
    /// # Arguments
    /// * `args` - Matches of the `manifest` subcommand
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> PrepResult<Self> {
        let dataset_id = required_arg(args, "dataset-id")?;
        let raw_data_location = required_arg(args, "raw-data-location")?;
        let experiment_file = PathBuf::from(required_arg(args, "experiment")?);

        let segm_json = args.get_one::<String>("segm-json").map(PathBuf::from);
        let segm_text = args.get_one::<String>("segm-text").map(PathBuf::from);
        let segmentation = match (segm_json, segm_text) {
            (Some(json), Some(text)) => {
                warn!(
                    "Segmentation parameter files {} and {} provided. Will only use {}",
                    json.display(),
                    text.display(),
                    json.display()
                );
                SegmentationSource::Json(json)
            }
            (Some(json), None) => SegmentationSource::Json(json),
            (None, Some(text)) => SegmentationSource::Text(text),
            (None, None) => {
                return Err(PrepError::GenericError(
                    "Segmentation parameters file name not provided. Use --segm-json or --segm-text".to_string(),
                ))
            }
        };

        let output_file = args
            .get_one::<String>("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DatasetManifest::default_file_name(&dataset_id)));
        info!("Output filename: {}", output_file.display());

        Ok(ManifestCommand {
            dataset_id,
            raw_data_location,
            experiment_file,
            segmentation,
            channel_names_file: args.get_one::<String>("channel-names").map(PathBuf::from),
            output_file,
            logger,
        })
    }
}

impl<'a> Command for ManifestCommand<'a> {
    fn execute(&self) -> PrepResult<()> {
        info!("Reading config from {}...", self.experiment_file.display());
        let experiment = ConfigDocument::from_json_file(&self.experiment_file)?;

        let segmentation = match &self.segmentation {
            SegmentationSource::Json(path) => ConfigDocument::from_json_file(path)?,
            SegmentationSource::Text(path) => ConfigDocument::from_key_value_file(path)?,
        };

        let manifest = ManifestBuilder::new(
            &self.dataset_id,
            &self.raw_data_location,
            experiment,
            segmentation,
        )
        .channel_names_file(self.channel_names_file.clone())
        .build()?;

        manifest.write_json(&self.output_file)?;
        self.logger.log(&format!(
            "manifest {} written to {}",
            self.dataset_id,
            self.output_file.display()
        ))?;

        Ok(())
    }
}
