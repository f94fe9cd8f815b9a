//! Frame manifest structure tests.

use std::fs;

use framepick::{FrameManifest, FrameRecord};

#[test]
fn header_is_present_even_with_zero_records() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = directory.path().join("frames_info.csv");

    let manifest = FrameManifest::create(&csv_path).expect("Failed to create manifest");
    let rows = manifest.finish().expect("Failed to finish manifest");
    assert_eq!(rows, 0);

    let content = fs::read_to_string(&csv_path).expect("Failed to read manifest");
    assert_eq!(content.trim_end(), "image_name,video_name,timestamp");
}

#[test]
fn rows_are_written_in_insertion_order() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = directory.path().join("frames_info.csv");

    let mut manifest = FrameManifest::create(&csv_path).expect("Failed to create manifest");
    manifest
        .append(&FrameRecord {
            image_name: "image_1.jpg".to_string(),
            video_name: "clip.mp4".to_string(),
            timestamp: 0.0,
        })
        .expect("Failed to append record");
    manifest
        .append(&FrameRecord {
            image_name: "image_2.jpg".to_string(),
            video_name: "clip.mp4".to_string(),
            timestamp: 4.8,
        })
        .expect("Failed to append record");
    let rows = manifest.finish().expect("Failed to finish manifest");
    assert_eq!(rows, 2);

    let mut reader = csv::Reader::from_path(&csv_path).expect("Failed to open manifest");
    let headers = reader.headers().expect("Failed to read header").clone();
    assert_eq!(headers, vec!["image_name", "video_name", "timestamp"]);

    let records: Vec<FrameRecord> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("Failed to parse rows");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].image_name, "image_1.jpg");
    assert_eq!(records[1].image_name, "image_2.jpg");
    assert_eq!(records[1].timestamp, 4.8);
}

#[test]
fn create_truncates_a_previous_manifest() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = directory.path().join("frames_info.csv");

    let mut manifest = FrameManifest::create(&csv_path).expect("Failed to create manifest");
    manifest
        .append(&FrameRecord {
            image_name: "image_1.jpg".to_string(),
            video_name: "old.mp4".to_string(),
            timestamp: 1.5,
        })
        .expect("Failed to append record");
    manifest.finish().expect("Failed to finish manifest");

    // A new run starts over.
    let manifest = FrameManifest::create(&csv_path).expect("Failed to re-create manifest");
    manifest.finish().expect("Failed to finish manifest");

    let content = fs::read_to_string(&csv_path).expect("Failed to read manifest");
    assert_eq!(content.trim_end(), "image_name,video_name,timestamp");
}
