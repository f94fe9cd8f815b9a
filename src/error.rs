//! Error types for the `framepick` crate.
//!
//! This module defines [`FramePickError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry rich context to aid
//! debugging, including file paths, segment indices, and upstream error
//! messages.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framepick` operations.
///
/// Every public method that can fail returns `Result<T, FramePickError>`.
/// Variants carry enough context to diagnose the problem without needing
/// additional logging at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramePickError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoFile::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// A sampling interval of zero was provided.
    #[error("Sampling interval must be greater than zero")]
    InvalidInterval,

    /// The input path does not exist.
    #[error("Input path does not exist: {path}")]
    InputNotFound {
        /// The path that was supplied.
        path: PathBuf,
    },

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {reason}")]
    OutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// Underlying reason the creation failed.
        reason: String,
    },

    /// A non-positive segment duration was requested.
    ///
    /// Left unguarded this would make the segmenting loop degenerate or
    /// never terminate, so it is rejected up front.
    #[error("Segment duration must be greater than zero, got {seconds}s")]
    InvalidSegmentDuration {
        /// The requested duration in seconds.
        seconds: f64,
    },

    /// The external transcoder failed to produce a segment.
    ///
    /// Covers both a failure to spawn the process and a non-zero exit
    /// status. Segment cuts are independently recoverable; see
    /// [`SegmentReport`](crate::SegmentReport).
    #[error("Transcode of {output} failed: {reason}")]
    TranscodeFailed {
        /// The segment file that was being produced.
        output: PathBuf,
        /// Spawn error or exit-status description.
        reason: String,
    },

    /// An error from the `csv` crate while writing the manifest.
    #[error("CSV manifest error: {0}")]
    CsvError(#[from] csv::Error),

    /// An error from the `image` crate during frame conversion or saving.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),
}

impl From<FfmpegError> for FramePickError {
    fn from(error: FfmpegError) -> Self {
        FramePickError::FfmpegError(error.to_string())
    }
}
