//! Acquisition metadata
//!
//! Remaps the acquisition fields of a CODEX Toolkit experiment file onto
//! the names Cytokit expects. The same block appears in the dataset
//! manifest and in the `acquisition` section of a Cytokit config.

mod target_shape;

pub use target_shape::{calculate_target_shape, TARGET_MAGNIFICATION};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::channels::make_channel_names_unique;
use crate::document::ConfigDocument;
use crate::errors::{PrepError, PrepResult};

/// Acquisition parameters of a CODEX experiment
///
/// Fields that are only passed through keep their original JSON value so
/// that integers are not turned into floats on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acquisition {
    pub emission_wavelengths: Value,
    pub axial_resolution: Value,
    pub lateral_resolution: Value,
    pub magnification: Value,
    pub num_z_planes: Value,
    pub numerical_aperture: Value,
    pub objective_type: Value,
    pub region_names: Value,
    pub region_height: Value,
    pub region_width: Value,
    pub tile_height: u64,
    pub tile_width: u64,
    pub tile_overlap_x: Value,
    pub tile_overlap_y: Value,
    pub tiling_mode: Value,
    /// Names of the channels within one cycle
    pub per_cycle_channel_names: Vec<String>,
    /// Names of every channel across all cycles
    pub channel_names: Vec<String>,
    pub num_cycles: usize,
}

impl Acquisition {
    /// Build the acquisition block from an experiment document
    ///
    /// # Arguments
    /// * `experiment` - Parsed experiment.json
    /// * `channel_names` - Full channel list; repeated names are made unique
    ///
    /// # Returns
    /// The acquisition block, or an error if a required field is missing
    pub fn from_experiment(experiment: &ConfigDocument, channel_names: &[String]) -> PrepResult<Self> {
        let per_cycle_channel_names = experiment.collect_string_list(&["channel_names"])?;
        let channel_names = make_channel_names_unique(channel_names);
        let num_cycles = count_cycles(channel_names.len(), per_cycle_channel_names.len())?;

        let magnification = experiment.collect_attribute(&["magnification"])?.clone();
        if !magnification.is_number() {
            return Err(PrepError::invalid(
                "magnification",
                format!("expected a number, found {}", magnification),
            ));
        }

        let acquisition = Acquisition {
            emission_wavelengths: experiment
                .collect_attribute(&["emission_wavelengths", "wavelengths"])?
                .clone(),
            axial_resolution: experiment.collect_attribute(&["zPitch", "z_pitch"])?.clone(),
            lateral_resolution: experiment
                .collect_attribute(&["xyResolution", "per_pixel_XY_resolution"])?
                .clone(),
            magnification,
            num_z_planes: experiment.collect_attribute(&["num_z_planes"])?.clone(),
            numerical_aperture: experiment
                .collect_attribute(&["aperture", "numerical_aperture"])?
                .clone(),
            objective_type: experiment.collect_attribute(&["objectiveType"])?.clone(),
            region_names: experiment.collect_attribute(&["region_names"])?.clone(),
            region_height: experiment.collect_attribute(&["region_height"])?.clone(),
            region_width: experiment.collect_attribute(&["region_width"])?.clone(),
            tile_height: experiment.collect_u64(&["tile_height"])?,
            tile_width: experiment.collect_u64(&["tile_width"])?,
            tile_overlap_x: experiment.collect_attribute(&["tile_overlap_X"])?.clone(),
            tile_overlap_y: experiment.collect_attribute(&["tile_overlap_Y"])?.clone(),
            tiling_mode: experiment.collect_attribute(&["tiling_mode"])?.clone(),
            per_cycle_channel_names,
            channel_names,
            num_cycles,
        };

        debug!(
            "Acquisition: {} cycles of {} channels",
            acquisition.num_cycles,
            acquisition.channels_per_cycle()
        );
        Ok(acquisition)
    }

    /// Number of channels acquired in each cycle
    pub fn channels_per_cycle(&self) -> usize {
        self.per_cycle_channel_names.len()
    }

    /// Objective magnification as a number
    pub fn magnification_value(&self) -> PrepResult<f64> {
        self.magnification.as_f64().ok_or_else(|| {
            PrepError::invalid(
                "magnification",
                format!("expected a number, found {}", self.magnification),
            )
        })
    }

    /// Tile dimensions rounded up for the nuclei segmentation network
    pub fn target_shape(&self) -> PrepResult<[u64; 2]> {
        calculate_target_shape(self.magnification_value()?, self.tile_height, self.tile_width)
    }
}

/// Number of cycles implied by the channel counts
///
/// The cycle count recorded in experiment files is not always reliable, so
/// it is derived from the channel lists instead.
fn count_cycles(total_channels: usize, channels_per_cycle: usize) -> PrepResult<usize> {
    if channels_per_cycle == 0 {
        return Err(PrepError::invalid("channel_names", "no channels per cycle listed"));
    }
    if total_channels % channels_per_cycle != 0 {
        return Err(PrepError::invalid(
            "channel_names",
            format!(
                "{} channel names cannot be split into cycles of {} channels",
                total_channels, channels_per_cycle
            ),
        ));
    }
    Ok(total_channels / channels_per_cycle)
}
