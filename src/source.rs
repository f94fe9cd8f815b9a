//! Input resolution and video discovery.
//!
//! The sampler accepts either a single video file or a directory of videos.
//! This module decides where the search root and the output directory live,
//! and enumerates the matching videos in a deterministic order.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::error::FramePickError;

/// File extensions (lowercase, without the dot) recognised as video input.
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

/// The default output folder name. When the caller passes this exact name,
/// the output directory resolution is overridden (see [`resolve_layout`]).
pub const DEFAULT_OUTPUT_FOLDER: &str = "output";

/// Resolved filesystem layout for a sampling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    /// Directory whose entries are scanned for videos.
    pub search_root: PathBuf,
    /// Directory images and the CSV manifest are written to.
    pub output_dir: PathBuf,
}

/// Whether `path` names a file with a recognised video extension.
///
/// The comparison is case-insensitive, so `CLIP.MP4` matches.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
            let extension = extension.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&extension.as_str())
        })
        .unwrap_or(false)
}

/// Resolve the search root and output directory for a sampling run.
///
/// - If `input` is a regular file, the search root is its containing
///   directory and the output directory is `<that directory>/<output_folder>`.
/// - If `input` is a directory, it is the search root itself and
///   `output_folder` is taken as a path as given (a relative name resolves
///   against the current working directory).
/// - If `output_folder` equals [`DEFAULT_OUTPUT_FOLDER`], the output
///   directory is unconditionally `<current working directory>/output`,
///   overriding the file-relative rule above. Callers that want a
///   file-relative output directory must pick a non-default folder name.
///
/// # Errors
///
/// Returns [`FramePickError::InputNotFound`] if `input` does not exist.
pub fn resolve_layout(input: &Path, output_folder: &str) -> Result<SourceLayout, FramePickError> {
    if !input.exists() {
        return Err(FramePickError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    let (search_root, output_dir) = if input.is_file() {
        let containing_dir = input.parent().unwrap_or_else(|| Path::new("."));
        (containing_dir.to_path_buf(), containing_dir.join(output_folder))
    } else {
        (input.to_path_buf(), PathBuf::from(output_folder))
    };

    let output_dir = if output_folder == DEFAULT_OUTPUT_FOLDER {
        env::current_dir()?.join(DEFAULT_OUTPUT_FOLDER)
    } else {
        output_dir
    };

    Ok(SourceLayout {
        search_root,
        output_dir,
    })
}

/// Enumerate the video files directly under `search_root`.
///
/// Only regular files whose extension is in [`VIDEO_EXTENSIONS`] are
/// returned. Entries are sorted lexicographically by file name so a run
/// produces the same image numbering on every filesystem.
pub fn discover_videos(search_root: &Path) -> Result<Vec<PathBuf>, FramePickError> {
    let mut videos: Vec<PathBuf> = Vec::new();

    for entry in std::fs::read_dir(search_root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_video_file(&path) {
            videos.push(path);
        }
    }

    videos.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

    log::debug!(
        "Discovered {} video(s) under {}",
        videos.len(),
        search_root.display(),
    );

    Ok(videos)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::is_video_file;

    #[test]
    fn extension_matching_is_case_insensitive() {
        assert!(is_video_file(Path::new("clip.mp4")));
        assert!(is_video_file(Path::new("CLIP.MP4")));
        assert!(is_video_file(Path::new("movie.MkV")));
        assert!(!is_video_file(Path::new("notes.txt")));
        assert!(!is_video_file(Path::new("no_extension")));
    }
}
