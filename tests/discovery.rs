//! Input layout resolution and video discovery tests.

use std::fs;

use framepick::{FramePickError, discover_videos, resolve_layout};

#[test]
fn missing_input_is_rejected() {
    let result = resolve_layout(
        std::path::Path::new("this_path_does_not_exist"),
        "frames",
    );
    assert!(matches!(result, Err(FramePickError::InputNotFound { .. })));
}

#[test]
fn file_input_resolves_next_to_the_file() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video_path = directory.path().join("clip.mp4");
    fs::write(&video_path, b"stub").expect("Failed to write stub file");

    let layout = resolve_layout(&video_path, "frames").expect("Failed to resolve layout");
    assert_eq!(layout.search_root, directory.path());
    assert_eq!(layout.output_dir, directory.path().join("frames"));
}

#[test]
fn directory_input_is_its_own_search_root() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");

    let layout = resolve_layout(directory.path(), "frames").expect("Failed to resolve layout");
    assert_eq!(layout.search_root, directory.path());
    // A non-default folder name is taken as a path as given.
    assert_eq!(layout.output_dir, std::path::PathBuf::from("frames"));
}

#[test]
fn default_folder_name_always_resolves_to_the_working_directory() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video_path = directory.path().join("clip.mp4");
    fs::write(&video_path, b"stub").expect("Failed to write stub file");

    let expected = std::env::current_dir().unwrap().join("output");

    // Even for a file input, where the non-default rule would resolve next
    // to the file.
    let layout = resolve_layout(&video_path, "output").expect("Failed to resolve layout");
    assert_eq!(layout.output_dir, expected);

    let layout = resolve_layout(directory.path(), "output").expect("Failed to resolve layout");
    assert_eq!(layout.output_dir, expected);
}

#[test]
fn discovery_filters_by_extension_and_sorts_by_name() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    for name in [
        "b_clip.mp4",
        "a_clip.MKV",
        "notes.txt",
        "c_clip.mov",
        "archive.tar",
    ] {
        fs::write(directory.path().join(name), b"stub").expect("Failed to write stub file");
    }
    fs::create_dir(directory.path().join("nested.mp4")).expect("Failed to create sub dir");

    let videos = discover_videos(directory.path()).expect("Failed to discover videos");
    let names: Vec<_> = videos
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    // Directories are ignored even with a video extension; order is
    // lexicographic by file name.
    assert_eq!(names, vec!["a_clip.MKV", "b_clip.mp4", "c_clip.mov"]);
}
