//! Tests for nuclear stain channel inference

extern crate std;

use crate::channels::infer_nuclei_channel;
use crate::errors::PrepError;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_plain_marker() {
    let all = names(&["DAPI", "CD4", "DAPI", "CD8"]);
    std::assert_eq!(infer_nuclei_channel(&all, 2).unwrap(), "DAPI");
}

#[test]
fn test_marker_is_case_insensitive() {
    let all = names(&["hoechst", "CD4", "Hoechst", "CD8"]);
    std::assert_eq!(infer_nuclei_channel(&all, 2).unwrap(), "hoechst");
}

#[test]
fn test_numbered_marker_resolves_to_first_cycle() {
    let all = names(&["DAPI_1", "CD4", "DAPI_2", "CD8", "DAPI3", "Ki67"]);
    std::assert_eq!(infer_nuclei_channel(&all, 2).unwrap(), "DAPI_1");
}

#[test]
fn test_blank_cycle_is_skipped() {
    let all = names(&["blank", "CD4", "DAPI2", "CD8"]);
    std::assert_eq!(infer_nuclei_channel(&all, 2).unwrap(), "DAPI2");
}

#[test]
fn test_no_marker_found() {
    let all = names(&["CD4", "DAPI", "CD8", "DAPI"]);
    let result = infer_nuclei_channel(&all, 2);
    std::assert!(std::matches!(result, Err(PrepError::ChannelInference(_))));
}

#[test]
fn test_two_markers_is_ambiguous() {
    let all = names(&["DAPI", "CD4", "HOECHST", "CD8"]);
    let result = infer_nuclei_channel(&all, 2);
    std::assert!(std::matches!(result, Err(PrepError::ChannelInference(_))));
}

#[test]
fn test_uneven_channel_count() {
    let all = names(&["DAPI", "CD4", "DAPI"]);
    std::assert!(infer_nuclei_channel(&all, 2).is_err());
}
