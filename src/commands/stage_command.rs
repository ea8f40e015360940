//! Analysis directory staging command

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::required_arg;
use crate::errors::PrepResult;
use crate::staging::{read_raw_data_location, StagingPlan};
use crate::utils::logger::Logger;

/// Command for creating a Cytokit analysis directory
pub struct StageCommand<'a> {
    manifest_file: PathBuf,
    target_dir: PathBuf,
    dry_run: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> StageCommand<'a> {
    /// Create a new stage command
    ///
    /// # Arguments
    /// * `args` - Matches of the `stage` subcommand
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> PrepResult<Self> {
        Ok(StageCommand {
            manifest_file: PathBuf::from(required_arg(args, "manifest")?),
            target_dir: PathBuf::from(required_arg(args, "target")?),
            dry_run: args.get_flag("dry-run"),
            logger,
        })
    }
}

impl<'a> Command for StageCommand<'a> {
    fn execute(&self) -> PrepResult<()> {
        info!("Reading manifest file {}...", self.manifest_file.display());
        let raw_data_location = read_raw_data_location(&self.manifest_file)?;

        let plan = StagingPlan::scan(&raw_data_location)?;
        info!(
            "Found {} cycle/region directories with {} raw files in {}",
            plan.sources.len(),
            plan.link_count(),
            plan.raw_data_location.display()
        );

        if self.dry_run {
            plan.describe(&self.target_dir);
            return Ok(());
        }

        let report = plan.execute(&self.target_dir)?;
        self.logger.log(&format!(
            "staged {} links in {} directories under {}",
            report.links_created,
            report.directories_created.len(),
            self.target_dir.display()
        ))?;

        Ok(())
    }
}
