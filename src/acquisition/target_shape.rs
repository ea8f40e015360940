//! Target shape for nuclei segmentation
//!
//! Cytokit's nuclei detection U-Net (from CellProfiler) works best at 20x
//! magnification and needs image height and width divisible by 2 raised to
//! the number of network layers, 2^3 = 8.

use log::debug;

use crate::errors::{PrepError, PrepResult};

/// Magnification the segmentation network was trained at
pub const TARGET_MAGNIFICATION: f64 = 20.0;

const SHAPE_MULTIPLE: u64 = 8;

/// Round tile dimensions up to the next multiple of 8
///
/// The rescale factor towards 20x is reported but not applied.
///
/// # Returns
/// `[height, width]`
pub fn calculate_target_shape(magnification: f64, tile_height: u64, tile_width: u64) -> PrepResult<[u64; 2]> {
    if !(magnification > 0.0) {
        return Err(PrepError::invalid(
            "magnification",
            format!("must be positive, found {}", magnification),
        ));
    }

    let scale_factor = TARGET_MAGNIFICATION / magnification;
    debug!("Scale factor to {}x: {}", TARGET_MAGNIFICATION, scale_factor);

    Ok([round_up(tile_height), round_up(tile_width)])
}

fn round_up(dimension: u64) -> u64 {
    dimension.div_ceil(SHAPE_MULTIPLE) * SHAPE_MULTIPLE
}
