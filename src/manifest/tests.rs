//! Tests for manifest collection

extern crate std;

use serde_json::json;

use crate::document::ConfigDocument;
use crate::errors::PrepError;
use crate::manifest::{DatasetManifest, ManifestBuilder};

fn experiment() -> ConfigDocument {
    let value = json!({
        "name": "src_CX_19-002",
        "dateProcessed": "2019-12-09",
        "wavelengths": [425, 525],
        "z_pitch": 1.5,
        "xyResolution": 377.44,
        "magnification": 20,
        "num_z_planes": 11,
        "numerical_aperture": 0.75,
        "objectiveType": "air",
        "region_names": ["reg1"],
        "region_height": 2,
        "region_width": 2,
        "tile_height": 1008,
        "tile_width": 1343,
        "tile_overlap_X": 576,
        "tile_overlap_Y": 432,
        "tiling_mode": "snake",
        "channel_names": ["CH1", "CH2"],
        "channelNames": { "channelNamesArray": ["DAPI", "CD4", "DAPI", "CD8", "DAPI", "Ki67"] },
        "bestFocusReferenceCycle": 2,
        "bestFocusReferenceChannel": 1,
        "driftCompReferenceCycle": 1,
        "drift_comp_channel": 1
    });
    ConfigDocument::new("experiment.json", value.as_object().unwrap().clone())
}

fn segmentation(text: &str) -> ConfigDocument {
    ConfigDocument::from_key_value_str("segm.txt", text).unwrap()
}

#[test]
fn test_manifest_channels() {
    let manifest = ManifestBuilder::new(
        "HBM123.ABCD.456",
        "/data/raw",
        experiment(),
        segmentation("nuclearStainCycle=3\nnuclearStainChannel=1\nmembrainStainCycle=3\nmembraneStainChannel=2\n"),
    )
    .date("2020-01-01 00:00:00")
    .build()
    .unwrap();

    std::assert_eq!(manifest.name, "HBM123.ABCD.456");
    std::assert_eq!(manifest.acquisition.num_cycles, 3);
    std::assert_eq!(manifest.best_focus.as_deref(), Some("DAPI_2"));
    std::assert_eq!(manifest.drift_compensation.as_deref(), Some("DAPI_1"));
    std::assert_eq!(manifest.nuclei_channel, "DAPI_3");
    std::assert_eq!(manifest.membrane_channel.as_deref(), Some("Ki67"));
    std::assert_eq!(manifest.target_shape, [1008, 1344]);
}

#[test]
fn test_unset_membrane_channel() {
    let manifest = ManifestBuilder::new(
        "HBM123.ABCD.456",
        "/data/raw",
        experiment(),
        segmentation("nuclearStainCycle=1\nnuclearStainChannel=1\nmembraneStainCycle=-1\nmembraneStainChannel=-1\n"),
    )
    .build()
    .unwrap();

    std::assert_eq!(manifest.membrane_channel, None);
}

#[test]
fn test_unset_nuclei_channel_is_fatal() {
    let result = ManifestBuilder::new(
        "HBM123.ABCD.456",
        "/data/raw",
        experiment(),
        segmentation("nuclearStainCycle=-1\nnuclearStainChannel=1\n"),
    )
    .build();

    std::assert!(std::matches!(result, Err(PrepError::ChannelInference(_))));
}

#[test]
fn test_manifest_json_round_trip_keeps_flattened_fields() {
    let manifest = ManifestBuilder::new(
        "HBM123.ABCD.456",
        "/data/raw",
        experiment(),
        segmentation("nuclearStainCycle=1\nnuclearStainChannel=1\n"),
    )
    .date("2020-01-01 00:00:00")
    .build()
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    manifest.write_json(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
    std::assert_eq!(raw["raw_data_location"], json!("/data/raw"));
    std::assert_eq!(raw["tile_overlap_x"], json!(576));
    std::assert_eq!(raw["magnification"], json!(20));

    let loaded = DatasetManifest::load(&path).unwrap();
    std::assert_eq!(loaded, manifest);
}

#[test]
fn test_legacy_manifest_is_only_usable_for_staging() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.json");
    std::fs::write(&path, r#"{"name": "HBM123.ABCD.456", "rawDataLocation": "/data/old"}"#).unwrap();

    std::assert!(std::matches!(DatasetManifest::load(&path), Err(PrepError::JsonError(_))));
    std::assert_eq!(
        crate::staging::read_raw_data_location(&path).unwrap(),
        std::path::Path::new("/data/old")
    );
}

#[test]
fn test_default_file_name() {
    std::assert_eq!(
        DatasetManifest::default_file_name("HBM123.ABCD.456"),
        "HBM123.ABCD.456_manifest.json"
    );
}
