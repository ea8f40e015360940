//! Channel name lists and index lookups

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::document::ConfigDocument;
use crate::errors::{PrepError, PrepResult};

/// Read a channel names file, one name per line
pub fn read_channel_names_file<P: AsRef<Path>>(path: P) -> PrepResult<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;

    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!("Read {} channel names from {}", names.len(), path.display());
    Ok(names)
}

/// Find the full channel list for an experiment
///
/// An explicit channel names file takes precedence over the
/// `channelNames.channelNamesArray` field of the experiment document.
pub fn resolve_channel_names(
    channel_names_file: Option<&Path>,
    experiment: &ConfigDocument,
) -> PrepResult<Vec<String>> {
    if let Some(path) = channel_names_file {
        return read_channel_names_file(path);
    }

    info!("No channel names file passed. Looking for channel names in experiment JSON.");
    if !experiment.contains("channelNames") {
        return Err(PrepError::GenericError(
            "Cannot find data for channel_names field".to_string(),
        ));
    }

    experiment
        .nested("channelNames")?
        .collect_string_list(&["channelNamesArray"])
}

/// Append an occurrence counter to names that appear more than once
///
/// If DAPI was used in every cycle and each channel is just called "DAPI",
/// the one from a specific cycle cannot be selected for segmentation or
/// focus. Repeated names become `DAPI_1`, `DAPI_2`, ... in input order;
/// names that occur once are left alone.
pub fn make_channel_names_unique(names: &[String]) -> Vec<String> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *totals.entry(name.as_str()).or_insert(0) += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    names
        .iter()
        .map(|name| {
            if totals[name.as_str()] > 1 {
                let count = seen.entry(name.as_str()).or_insert(0);
                *count += 1;
                format!("{}_{}", name, count)
            } else {
                name.clone()
            }
        })
        .collect()
}

/// Look up a channel name from 1-based cycle and channel indices
///
/// A negative index is the "not set" convention used by the CODEX Toolkit
/// (e.g. `membraneStainCycle: -1` when there is no membrane stain) and
/// yields `None`.
///
/// # Arguments
/// * `cycle` - 1-based cycle index
/// * `channel` - 1-based channel index within the cycle
/// * `names` - Full channel list, cycle after cycle
/// * `channels_per_cycle` - Number of channels acquired in each cycle
pub fn infer_channel_name_from_index(
    cycle: i64,
    channel: i64,
    names: &[String],
    channels_per_cycle: usize,
) -> PrepResult<Option<String>> {
    if cycle < 0 || channel < 0 {
        return Ok(None);
    }

    if cycle == 0 {
        return Err(PrepError::invalid("cycle", "cycle indices start at 1"));
    }
    let channel_offset = usize::try_from(channel - 1)
        .ok()
        .filter(|offset| *offset < channels_per_cycle)
        .ok_or_else(|| {
            PrepError::invalid(
                "channel",
                format!("channel {} outside 1..={}", channel, channels_per_cycle),
            )
        })?;

    let beyond_names = || {
        PrepError::invalid(
            "cycle",
            format!(
                "cycle {} channel {} is beyond the {} known channel names",
                cycle,
                channel,
                names.len()
            ),
        )
    };

    let index = usize::try_from(cycle - 1)
        .ok()
        .and_then(|offset| offset.checked_mul(channels_per_cycle))
        .and_then(|start| start.checked_add(channel_offset))
        .ok_or_else(beyond_names)?;

    names.get(index).cloned().map(Some).ok_or_else(beyond_names)
}
