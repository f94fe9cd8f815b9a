//! External transcoder collaborator.
//!
//! Segment cuts are delegated to an external stream-copy transcode process.
//! The [`Transcoder`] trait keeps the segmenter independent of how the cut
//! is performed; [`FfmpegCommand`] shells out to the `ffmpeg` binary.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::FramePickError;

/// Cuts `[start, end)` (seconds) out of `input` into `output`.
///
/// Implementations must not re-encode; segments are stream copies of the
/// source.
pub trait Transcoder {
    /// Produce one clip. A failure of any kind (spawn, exit status) must be
    /// reported, never swallowed.
    fn cut(
        &self,
        input: &Path,
        start_seconds: f64,
        end_seconds: f64,
        output: &Path,
    ) -> Result<(), FramePickError>;
}

/// [`Transcoder`] implementation backed by the `ffmpeg` command-line tool.
///
/// Invokes `ffmpeg -y -loglevel error -i <input> -ss <start> -to <end>
/// -c copy <output>` and checks the exit status. Existing output files are
/// overwritten.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    binary: PathBuf,
}

impl FfmpegCommand {
    /// Use the `ffmpeg` binary found on `PATH`.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
        }
    }

    /// Use a specific `ffmpeg` binary.
    pub fn with_binary<P: Into<PathBuf>>(binary: P) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcoder for FfmpegCommand {
    fn cut(
        &self,
        input: &Path,
        start_seconds: f64,
        end_seconds: f64,
        output: &Path,
    ) -> Result<(), FramePickError> {
        log::debug!(
            "Cutting [{start_seconds}s, {end_seconds}s) of {} into {}",
            input.display(),
            output.display(),
        );

        let status = Command::new(&self.binary)
            .arg("-y")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(input)
            .arg("-ss")
            .arg(start_seconds.to_string())
            .arg("-to")
            .arg(end_seconds.to_string())
            .arg("-c")
            .arg("copy")
            .arg(output)
            .status()
            .map_err(|error| FramePickError::TranscodeFailed {
                output: output.to_path_buf(),
                reason: format!("failed to spawn {}: {error}", self.binary.display()),
            })?;

        if !status.success() {
            return Err(FramePickError::TranscodeFailed {
                output: output.to_path_buf(),
                reason: match status.code() {
                    Some(code) => format!("{} exited with status {code}", self.binary.display()),
                    None => format!("{} was terminated by a signal", self.binary.display()),
                },
            });
        }

        Ok(())
    }
}
