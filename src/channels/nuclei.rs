//! Nuclear stain channel inference

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use log::{debug, error};
use regex::Regex;

use crate::errors::{PrepError, PrepResult};

/// Reporters known to be used to stain nuclei
pub const NUCLEI_MARKERS: [&str; 2] = ["DAPI", "HOECHST"];

lazy_static! {
    // Marker name with an optional cycle number, e.g. DAPI, dapi2, DAPI_3
    static ref NUCLEI_CHANNEL: Regex = Regex::new(&format!(
        r"(?i)^({})(?:_?\d+)?$",
        NUCLEI_MARKERS.join("|")
    ))
    .unwrap();
}

/// Guess the name of the nuclear stain channel
///
/// Assumes the nuclear stain sits in the first channel of each cycle and is
/// one of the known markers. Exactly one marker may be found across the
/// cycles; the channel from the earliest cycle carrying it is returned, so
/// numbered names such as `DAPI_1`, `DAPI_2` resolve to `DAPI_1`.
///
/// # Arguments
/// * `names` - Full channel list, cycle after cycle
/// * `channels_per_cycle` - Number of channels acquired in each cycle
pub fn infer_nuclei_channel(names: &[String], channels_per_cycle: usize) -> PrepResult<String> {
    if channels_per_cycle == 0 {
        return Err(PrepError::invalid("channels_per_cycle", "must be at least 1"));
    }

    if names.len() % channels_per_cycle != 0 {
        error!(
            "Number of channels: {}, channels per cycle: {}",
            names.len(),
            channels_per_cycle
        );
        return Err(PrepError::ChannelInference(
            "total number of channels is not a multiple of the channels per cycle".to_string(),
        ));
    }

    // Number of cycles in the experiment file is not always reliable.
    let num_cycles = names.len() / channels_per_cycle;

    let mut markers = BTreeSet::new();
    let mut first_match: Option<&str> = None;

    for cycle in 0..num_cycles {
        let name = names[cycle * channels_per_cycle].as_str();
        if let Some(captures) = NUCLEI_CHANNEL.captures(name) {
            markers.insert(captures[1].to_uppercase());
            first_match.get_or_insert(name);
        }
    }

    debug!("Nuclei markers found: {:?}", markers);

    match (first_match, markers.len()) {
        (None, _) => Err(PrepError::ChannelInference(
            "No nuclei channel found".to_string(),
        )),
        (Some(name), 1) => Ok(name.to_string()),
        (Some(_), _) => Err(PrepError::ChannelInference(
            "Found more than one possible nuclei channel".to_string(),
        )),
    }
}
