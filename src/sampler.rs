//! The frame-sampling run.
//!
//! [`Sampler`] drives the whole operation: resolve the input layout, create
//! the output directory and CSV manifest, then walk the discovered videos in
//! sorted order, keeping every [`SAMPLE_INTERVAL`]-th decoded frame of each.
//! Sampled frames are written as `image_<n>.jpg` where `n` is a run-wide
//! counter that starts at 1 and never resets between videos, so every image
//! in a run has a unique, never-reused number.
//!
//! A video that fails to open (or dies mid-decode) is logged and skipped;
//! the run continues with the remaining files.

use std::{
    fs,
    path::PathBuf,
    sync::Arc,
};

use crate::{
    error::FramePickError,
    manifest::{FrameManifest, FrameRecord},
    progress::{NoOpProgress, ProgressCallback, ProgressInfo},
    source::{self, SourceLayout},
    video::VideoFile,
};

/// Sampling cadence: every 120th decoded frame (0-indexed) is kept.
///
/// Fixed, not configurable.
pub const SAMPLE_INTERVAL: u64 = 120;

/// Default file name for the CSV manifest.
pub const DEFAULT_CSV_FILENAME: &str = "frames_info.csv";

/// Summary of a completed sampling run.
#[derive(Debug, Clone)]
#[must_use]
pub struct SampleReport {
    /// Directory the images and manifest were written to.
    pub output_dir: PathBuf,
    /// Path of the CSV manifest.
    pub csv_path: PathBuf,
    /// Videos successfully decoded to end of stream.
    pub videos_processed: usize,
    /// Videos skipped because they failed to open or decode.
    pub videos_skipped: usize,
    /// Total frames sampled across all videos.
    pub frames_sampled: u64,
}

/// Builder for a frame-sampling run.
///
/// # Example
///
/// ```no_run
/// use framepick::Sampler;
///
/// let report = Sampler::new("holiday_clips/")
///     .output_folder("stills")
///     .csv_filename("stills.csv")
///     .run()?;
/// println!("sampled {} frame(s)", report.frames_sampled);
/// # Ok::<(), framepick::FramePickError>(())
/// ```
pub struct Sampler {
    input: PathBuf,
    output_folder: String,
    csv_filename: String,
    progress: Arc<dyn ProgressCallback>,
}

impl Sampler {
    /// Create a sampler for a video file or a directory of videos.
    ///
    /// Defaults: output folder [`source::DEFAULT_OUTPUT_FOLDER`], manifest
    /// name [`DEFAULT_CSV_FILENAME`].
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            input: input.into(),
            output_folder: source::DEFAULT_OUTPUT_FOLDER.to_string(),
            csv_filename: DEFAULT_CSV_FILENAME.to_string(),
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the output folder name.
    ///
    /// Resolution of the actual directory is described on
    /// [`source::resolve_layout`]; in particular the default name `"output"`
    /// always resolves relative to the current working directory.
    #[must_use]
    pub fn output_folder<S: Into<String>>(mut self, name: S) -> Self {
        self.output_folder = name.into();
        self
    }

    /// Set the CSV manifest file name.
    #[must_use]
    pub fn csv_filename<S: Into<String>>(mut self, name: S) -> Self {
        self.csv_filename = name.into();
        self
    }

    /// Attach a progress callback, invoked once per processed video.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    /// Execute the sampling run.
    ///
    /// Creates the output directory (and any missing parents), truncates and
    /// re-creates the manifest, then processes each discovered video in
    /// lexicographic file-name order. The manifest stays open for the whole
    /// run and is flushed at the end.
    ///
    /// Finding zero videos is not an error: the run completes with a
    /// header-only manifest and a warning.
    ///
    /// # Errors
    ///
    /// - [`FramePickError::InputNotFound`] if the input path does not exist.
    /// - [`FramePickError::OutputDir`] if the output directory cannot be
    ///   created.
    /// - [`FramePickError::CsvError`] / [`FramePickError::IoError`] for
    ///   manifest failures.
    ///
    /// Per-video open and decode failures are **not** errors of the run;
    /// they are logged and counted in
    /// [`SampleReport::videos_skipped`].
    pub fn run(&self) -> Result<SampleReport, FramePickError> {
        let SourceLayout {
            search_root,
            output_dir,
        } = source::resolve_layout(&self.input, &self.output_folder)?;

        fs::create_dir_all(&output_dir).map_err(|error| FramePickError::OutputDir {
            path: output_dir.clone(),
            reason: error.to_string(),
        })?;

        let csv_path = output_dir.join(&self.csv_filename);
        let mut manifest = FrameManifest::create(&csv_path)?;

        let videos = source::discover_videos(&search_root)?;
        if videos.is_empty() {
            log::warn!(
                "No video files matched under {} (looking for {:?})",
                search_root.display(),
                source::VIDEO_EXTENSIONS,
            );
        }

        let total_videos = videos.len() as u64;
        let mut videos_processed = 0_usize;
        let mut videos_skipped = 0_usize;
        // Run-wide image number; unique across all videos, first image is 1.
        let mut image_counter = 1_u64;

        for (video_number, video_path) in videos.iter().enumerate() {
            match sample_one_video(video_path, &output_dir, &mut manifest, &mut image_counter) {
                Ok(sampled) => {
                    videos_processed += 1;
                    log::info!(
                        "Sampled {} frame(s) from {}",
                        sampled,
                        video_path.display(),
                    );
                }
                Err(error) => {
                    videos_skipped += 1;
                    log::warn!("Skipping {}: {error}", video_path.display());
                }
            }

            self.progress.on_progress(&ProgressInfo {
                current: video_number as u64 + 1,
                total: Some(total_videos),
            });
        }

        let frames_sampled = manifest.rows();
        manifest.finish()?;

        Ok(SampleReport {
            output_dir,
            csv_path,
            videos_processed,
            videos_skipped,
            frames_sampled,
        })
    }
}

/// Sample a single video, appending images and manifest rows.
///
/// `image_counter` is owned by the run and advanced here so numbering stays
/// strictly increasing across videos. Returns the number of frames sampled
/// from this video.
fn sample_one_video(
    video_path: &std::path::Path,
    output_dir: &std::path::Path,
    manifest: &mut FrameManifest,
    image_counter: &mut u64,
) -> Result<u64, FramePickError> {
    let video_name = video_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut video = VideoFile::open(video_path)?;
    let mut sampled = 0_u64;

    video.for_each_sampled_frame(SAMPLE_INTERVAL, |frame| {
        let image_name = format!("image_{image_counter}.jpg");
        let image_path = output_dir.join(&image_name);

        log::debug!(
            "Saving frame {} of {} to {}",
            frame.frame_index,
            video_name,
            image_path.display(),
        );
        frame.image.save(&image_path)?;

        manifest.append(&FrameRecord {
            image_name,
            video_name: video_name.clone(),
            timestamp: frame.timestamp,
        })?;

        *image_counter += 1;
        sampled += 1;
        Ok(())
    })?;

    Ok(sampled)
}
