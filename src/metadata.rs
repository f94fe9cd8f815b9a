//! Video metadata types.
//!
//! This module defines the metadata structure returned by
//! [`VideoFile::metadata`](crate::VideoFile::metadata). Metadata is extracted
//! once when the file is opened and cached for the lifetime of the handle.

use std::time::Duration;

/// Metadata for the best video stream of an opened file.
///
/// Includes dimensions, frame rate, estimated frame count, container
/// duration, and codec name.
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Estimated total number of frames, computed from duration and frame rate.
    pub frame_count: u64,
    /// Total duration of the container.
    pub duration: Duration,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}

impl VideoMetadata {
    /// Playable duration in whole seconds, derived from the frame count and
    /// frame rate. This is the value the segmenter plans against.
    ///
    /// Returns `0` for an empty or unreadable stream (zero frame rate).
    pub fn whole_seconds(&self) -> u64 {
        if self.frames_per_second > 0.0 {
            (self.frame_count as f64 / self.frames_per_second).floor() as u64
        } else {
            0
        }
    }
}
