//! Cytokit config generation command

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::channels::resolve_channel_names;
use crate::commands::command_traits::Command;
use crate::commands::required_arg;
use crate::cytokit::{CytokitConfigBuilder, CytokitDefaults};
use crate::document::ConfigDocument;
use crate::errors::{PrepError, PrepResult};
use crate::manifest::DatasetManifest;
use crate::utils::logger::Logger;

/// Input the config is generated from
#[derive(Debug, Clone)]
enum ConfigInput {
    Manifest(PathBuf),
    Experiment(PathBuf),
}

/// Command for writing a Cytokit experiment config
pub struct ConfigCommand<'a> {
    input: ConfigInput,
    channel_names_file: Option<PathBuf>,
    defaults_file: Option<PathBuf>,
    output_file: PathBuf,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ConfigCommand<'a> {
    /// Create a new config command
    ///
    /// # Arguments
    /// * `args` - Matches of the `cytokit-config` subcommand
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> PrepResult<Self> {
        let input = if let Some(path) = args.get_one::<String>("manifest") {
            ConfigInput::Manifest(PathBuf::from(path))
        } else if let Some(path) = args.get_one::<String>("experiment") {
            ConfigInput::Experiment(PathBuf::from(path))
        } else {
            return Err(PrepError::GenericError(
                "Missing input. Use --manifest or --experiment".to_string(),
            ));
        };

        let output_file = PathBuf::from(required_arg(args, "output")?);
        info!("Output filename: {}", output_file.display());

        Ok(ConfigCommand {
            input,
            channel_names_file: args.get_one::<String>("channel-names").map(PathBuf::from),
            defaults_file: args.get_one::<String>("defaults").map(PathBuf::from),
            output_file,
            logger,
        })
    }
}

impl<'a> Command for ConfigCommand<'a> {
    fn execute(&self) -> PrepResult<()> {
        let defaults = match &self.defaults_file {
            Some(path) => {
                info!("Loading Cytokit defaults from {}", path.display());
                CytokitDefaults::from_file(path)?
            }
            None => CytokitDefaults::builtin(),
        };
        let builder = CytokitConfigBuilder::new(defaults);

        let config = match &self.input {
            ConfigInput::Manifest(path) => {
                info!("Reading manifest {}...", path.display());
                builder.from_manifest(&DatasetManifest::load(path)?)?
            }
            ConfigInput::Experiment(path) => {
                info!("Reading config from {}...", path.display());
                let experiment = ConfigDocument::from_json_file(path)?;
                let channel_names = resolve_channel_names(self.channel_names_file.as_deref(), &experiment)?;
                builder.from_experiment(&experiment, &channel_names)?
            }
        };

        info!("Writing Cytokit config to {}", self.output_file.display());
        config.write_yaml(&self.output_file)?;
        self.logger.log(&format!(
            "cytokit config for {} written to {}",
            config.name,
            self.output_file.display()
        ))?;

        Ok(())
    }
}
