//! Scanning a raw data directory and creating the analysis layout

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::errors::{PrepError, PrepResult};
use crate::utils::progress::ProgressTracker;

use super::patterns::{is_raw_data_file, link_file_name, parse_raw_data_dir};
use super::{DATA_DIR, OUTPUT_DIR};

/// One cycle/region directory of raw data
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRegionSource {
    /// Directory name as submitted
    pub dir_name: String,
    pub cycle: String,
    pub region: String,
    /// Raw TIFF file names, sorted
    pub files: Vec<String>,
}

impl CycleRegionSource {
    /// Name of the staged directory, e.g. `Cyc1_reg1`
    pub fn target_dir_name(&self) -> String {
        format!("Cyc{}_reg{}", self.cycle, self.region)
    }
}

/// What was created by `StagingPlan::execute`
#[derive(Debug, Default)]
pub struct StagingReport {
    pub directories_created: Vec<PathBuf>,
    pub links_created: usize,
}

/// Raw data found under a source directory, ready to be linked
#[derive(Debug)]
pub struct StagingPlan {
    /// Absolute path of the raw data directory
    pub raw_data_location: PathBuf,
    pub sources: Vec<CycleRegionSource>,
}

impl StagingPlan {
    /// Inspect a raw data directory
    ///
    /// Every directory matching the cycle/region pattern must hold at least
    /// one file matching the raw file pattern. Other entries are ignored.
    pub fn scan<P: AsRef<Path>>(raw_data_location: P) -> PrepResult<Self> {
        let location = raw_data_location.as_ref();

        let metadata = fs::metadata(location).map_err(|e| {
            PrepError::StagingError(format!("Source directory {}: {}", location.display(), e))
        })?;
        if !metadata.is_dir() {
            return Err(PrepError::StagingError(format!(
                "Source {} is not a directory",
                location.display()
            )));
        }

        let location = fs::canonicalize(location)?;
        let mut sources = Vec::new();
        let mut seen = HashSet::new();

        for dir_name in list_entries(&location, true)? {
            let Some((cycle, region)) = parse_raw_data_dir(&dir_name) else {
                debug!("Skipping {}", dir_name);
                continue;
            };

            if !seen.insert((cycle.clone(), region.clone())) {
                return Err(PrepError::StagingError(format!(
                    "More than one directory for cycle {} region {} (at {})",
                    cycle, region, dir_name
                )));
            }

            let files: Vec<String> = list_entries(&location.join(&dir_name), false)?
                .into_iter()
                .filter(|name| is_raw_data_file(name))
                .collect();

            if files.is_empty() {
                return Err(PrepError::StagingError(format!(
                    "No files found matching expected raw file naming pattern in {}",
                    dir_name
                )));
            }

            debug!("{}: cycle {}, region {}, {} files", dir_name, cycle, region, files.len());
            sources.push(CycleRegionSource {
                dir_name,
                cycle,
                region,
                files,
            });
        }

        if sources.is_empty() {
            return Err(PrepError::StagingError(format!(
                "No directories matching expected raw data directory naming pattern found in {}",
                location.display()
            )));
        }

        Ok(StagingPlan {
            raw_data_location: location,
            sources,
        })
    }

    /// Total number of links the plan will create
    pub fn link_count(&self) -> usize {
        self.sources.iter().map(|s| s.files.len()).sum()
    }

    /// Log what `execute` would do without touching the filesystem
    pub fn describe(&self, target_dir: &Path) {
        let data_dir = target_dir.join(DATA_DIR);
        info!("Would create {}", target_dir.display());
        for source in &self.sources {
            let dir = data_dir.join(source.target_dir_name());
            info!(
                "Would link {} files from {} into {}",
                source.files.len(),
                self.raw_data_location.join(&source.dir_name).display(),
                dir.display()
            );
            for file in &source.files {
                debug!("  {} -> {}", link_file_name(file, &source.region), file);
            }
        }
    }

    /// Create the analysis directory and the raw data links
    ///
    /// `target_dir` must not exist yet.
    pub fn execute(&self, target_dir: &Path) -> PrepResult<StagingReport> {
        let mut report = StagingReport::default();

        create_dir(target_dir, &mut report)?;
        info!("Cytokit analysis directory created at {}", target_dir.display());

        let data_dir = target_dir.join(DATA_DIR);
        create_dir(&data_dir, &mut report)?;
        create_dir(&target_dir.join(OUTPUT_DIR), &mut report)?;

        info!("Creating symlinks to raw data files...");
        let progress = ProgressTracker::new(self.link_count() as u64, "Linking raw data");

        for source in &self.sources {
            let cycle_region_dir = data_dir.join(source.target_dir_name());
            create_dir(&cycle_region_dir, &mut report)?;

            for file in &source.files {
                let original = self.raw_data_location.join(&source.dir_name).join(file);
                let link = cycle_region_dir.join(link_file_name(file, &source.region));

                symlink(&original, &link).map_err(|e| {
                    PrepError::StagingError(format!(
                        "Could not create symbolic link {}: {}",
                        link.display(),
                        e
                    ))
                })?;
                report.links_created += 1;
                progress.increment(1);
            }
        }

        progress.finish();
        info!("Links created in directories under {}", data_dir.display());
        Ok(report)
    }
}

fn create_dir(path: &Path, report: &mut StagingReport) -> PrepResult<()> {
    fs::create_dir(path).map_err(|e| {
        PrepError::StagingError(format!("Could not create directory {}: {}", path.display(), e))
    })?;
    debug!("Directory {} created", path.display());
    report.directories_created.push(path.to_path_buf());
    Ok(())
}

/// Sorted names of the subdirectories (or files) of a directory
fn list_entries(dir: &Path, directories: bool) -> PrepResult<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        PrepError::StagingError(format!(
            "Could not acquire list of contents for {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir() || entry.path().is_dir();
        if is_dir != directories {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => warn!("Skipping non UTF-8 entry {:?} in {}", name, dir.display()),
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(unix)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
}
