//! Channel name handling
//!
//! Loading the full list of channel names for an experiment, making
//! duplicated names distinguishable, and working out which channel plays
//! which role (nuclear stain, focus reference, drift reference).

mod naming;
mod nuclei;
#[cfg(test)]
mod tests;

pub use naming::{
    infer_channel_name_from_index, make_channel_names_unique, read_channel_names_file,
    resolve_channel_names,
};
pub use nuclei::{infer_nuclei_channel, NUCLEI_MARKERS};
