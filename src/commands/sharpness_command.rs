//! Image sharpness scoring command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::Command;
use crate::errors::{PrepError, PrepResult};
use crate::quality::{FourierSharpness, Plane, QualityMetric};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command for scoring image sharpness
pub struct SharpnessCommand<'a> {
    images: Vec<PathBuf>,
    output_file: Option<PathBuf>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> SharpnessCommand<'a> {
    /// Create a new sharpness command
    ///
    /// # Arguments
    /// * `args` - Matches of the `sharpness` subcommand
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> PrepResult<Self> {
        let images: Vec<PathBuf> = args
            .get_many::<String>("images")
            .map(|values| values.map(PathBuf::from).collect())
            .unwrap_or_default();

        if images.is_empty() {
            return Err(PrepError::GenericError("No images given".to_string()));
        }

        Ok(SharpnessCommand {
            images,
            output_file: args.get_one::<String>("output").map(PathBuf::from),
            logger,
        })
    }

    /// Score every image and write one TSV row per image
    fn write_scores(&self, writer: &mut dyn Write) -> PrepResult<()> {
        let metric = FourierSharpness;
        writeln!(writer, "path\t{}", metric.name())?;

        let progress = (self.images.len() > 1)
            .then(|| ProgressTracker::new(self.images.len() as u64, "Scoring images"));

        for path in &self.images {
            if let Some(progress) = &progress {
                progress.set_message(&path.display().to_string());
            }

            let score = metric.score(&Plane::load(path)?)?;
            debug!("{}: {}", path.display(), score);
            writeln!(writer, "{}\t{}", path.display(), score)?;

            if let Some(progress) = &progress {
                progress.increment(1);
            }
        }

        if let Some(progress) = &progress {
            progress.finish();
        }
        Ok(())
    }
}

impl<'a> Command for SharpnessCommand<'a> {
    fn execute(&self) -> PrepResult<()> {
        match &self.output_file {
            Some(path) => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_scores(&mut writer)?;
                writer.flush()?;
                info!("Sharpness scores written to {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                self.write_scores(&mut writer)?;
            }
        }

        self.logger
            .log(&format!("scored sharpness of {} images", self.images.len()))?;
        Ok(())
    }
}
