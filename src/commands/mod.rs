//! CLI command implementations
//!
//! One command per subcommand, created from the parsed arguments by
//! `CodexPrepCommandFactory`.

pub mod command_traits;
pub mod manifest_command;
pub mod config_command;
pub mod stage_command;
pub mod sharpness_command;

pub use command_traits::{Command, CommandFactory};
pub use manifest_command::ManifestCommand;
pub use config_command::ConfigCommand;
pub use stage_command::StageCommand;
pub use sharpness_command::SharpnessCommand;

use clap::ArgMatches;

use crate::errors::{PrepError, PrepResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
pub struct CodexPrepCommandFactory;

impl CodexPrepCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        CodexPrepCommandFactory
    }
}

impl Default for CodexPrepCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for CodexPrepCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> PrepResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("manifest", sub)) => Ok(Box::new(ManifestCommand::new(sub, logger)?)),
            Some(("cytokit-config", sub)) => Ok(Box::new(ConfigCommand::new(sub, logger)?)),
            Some(("stage", sub)) => Ok(Box::new(StageCommand::new(sub, logger)?)),
            Some(("sharpness", sub)) => Ok(Box::new(SharpnessCommand::new(sub, logger)?)),
            Some((name, _)) => Err(PrepError::GenericError(format!("Unknown command: {}", name))),
            None => Err(PrepError::GenericError("No command given".to_string())),
        }
    }
}

/// Fetch a required string argument
pub(crate) fn required_arg(args: &ArgMatches, name: &str) -> PrepResult<String> {
    args.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| PrepError::GenericError(format!("Missing argument: {}", name)))
}
