//! Video segmenting.
//!
//! [`Segmenter`] splits one video into consecutive, non-overlapping
//! fixed-duration clips named `segment_1.mp4`, `segment_2.mp4`, … Each clip
//! is produced by one [`Transcoder`] invocation (stream copy, no re-encode).
//! A failed cut does not abort the run; failures are collected in the
//! returned [`SegmentReport`].

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    error::FramePickError,
    progress::{NoOpProgress, ProgressCallback, ProgressInfo},
    transcoder::Transcoder,
    video::VideoFile,
};

/// One planned clip: the time span `[start, end)` in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// 1-based position of this clip within the run.
    pub index: usize,
    /// Start of the span in seconds (inclusive).
    pub start: f64,
    /// End of the span in seconds (exclusive).
    pub end: f64,
}

impl Segment {
    /// File name this segment is written under (`segment_<index>.mp4`).
    pub fn file_name(&self) -> String {
        format!("segment_{}.mp4", self.index)
    }
}

/// Outcome of a segmenting run.
///
/// The run is considered complete even when individual cuts failed; callers
/// decide how to surface [`failed`](Self::failed).
#[derive(Debug)]
#[must_use]
pub struct SegmentReport {
    /// Directory the clips were written to.
    pub output_dir: PathBuf,
    /// Segments cut successfully, in order.
    pub completed: Vec<Segment>,
    /// Segments whose transcode failed, with the per-segment error.
    pub failed: Vec<(Segment, FramePickError)>,
}

impl SegmentReport {
    /// Whether every planned segment was cut.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Compute the consecutive segment spans covering `[0, total_duration)`.
///
/// Spans are contiguous and non-overlapping; every span except possibly the
/// last has length `segment_duration`, and the count is
/// `ceil(total_duration / segment_duration)`. A zero `total_duration` yields
/// an empty plan.
///
/// `segment_duration` must be positive; this is enforced by
/// [`Segmenter::new`].
pub fn plan_segments(total_duration: f64, segment_duration: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0.0_f64;
    let mut index = 1_usize;

    while start < total_duration {
        let end = (start + segment_duration).min(total_duration);
        segments.push(Segment { index, start, end });
        start = end;
        index += 1;
    }

    segments
}

/// Splits a video into fixed-duration clips.
///
/// # Example
///
/// ```no_run
/// use framepick::{FfmpegCommand, Segmenter};
///
/// let report = Segmenter::new("talk.mp4", "clips", 30.0)?.run(&FfmpegCommand::new())?;
/// for (segment, error) in &report.failed {
///     eprintln!("{} failed: {error}", segment.file_name());
/// }
/// # Ok::<(), framepick::FramePickError>(())
/// ```
pub struct Segmenter {
    input_path: PathBuf,
    output_dir: PathBuf,
    segment_duration: f64,
    progress: Arc<dyn ProgressCallback>,
}

impl Segmenter {
    /// Create a segmenter.
    ///
    /// # Errors
    ///
    /// Returns [`FramePickError::InvalidSegmentDuration`] if
    /// `segment_duration` is not strictly positive (zero would never
    /// terminate; negative would produce a degenerate cut).
    pub fn new<P1: AsRef<Path>, P2: AsRef<Path>>(
        input: P1,
        output_dir: P2,
        segment_duration: f64,
    ) -> Result<Self, FramePickError> {
        if !(segment_duration > 0.0) {
            return Err(FramePickError::InvalidSegmentDuration {
                seconds: segment_duration,
            });
        }

        Ok(Self {
            input_path: input.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            segment_duration,
            progress: Arc::new(NoOpProgress),
        })
    }

    /// Attach a progress callback, invoked once per attempted segment.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    /// Execute the segmenting run.
    ///
    /// Opens the input to measure it — an unreadable input is fatal for the
    /// whole invocation — then cuts each planned segment with `transcoder`.
    /// The total duration is `floor(frame_count / fps)` seconds; a video
    /// measuring zero seconds produces zero segments and an empty report.
    ///
    /// # Errors
    ///
    /// - [`FramePickError::FileOpen`] / [`FramePickError::NoVideoStream`]
    ///   if the input cannot be opened.
    /// - [`FramePickError::OutputDir`] if the output directory cannot be
    ///   created.
    ///
    /// Individual transcode failures are reported through
    /// [`SegmentReport::failed`], not as an error of the run.
    pub fn run<T: Transcoder>(&self, transcoder: &T) -> Result<SegmentReport, FramePickError> {
        let video = VideoFile::open(&self.input_path)?;
        let total_duration = video.metadata().whole_seconds() as f64;
        // The demuxer handle is only needed for measurement; the transcoder
        // re-opens the input itself.
        drop(video);

        if total_duration <= 0.0 {
            log::warn!(
                "{} has zero measurable duration, producing no segments",
                self.input_path.display(),
            );
        }

        let plan = plan_segments(total_duration, self.segment_duration);
        self.execute(&plan, transcoder)
    }

    /// Cut every segment in `plan`, collecting per-segment failures.
    fn execute<T: Transcoder>(
        &self,
        plan: &[Segment],
        transcoder: &T,
    ) -> Result<SegmentReport, FramePickError> {
        fs::create_dir_all(&self.output_dir).map_err(|error| FramePickError::OutputDir {
            path: self.output_dir.clone(),
            reason: error.to_string(),
        })?;

        let mut completed = Vec::new();
        let mut failed = Vec::new();

        for segment in plan {
            let output_path = self.output_dir.join(segment.file_name());

            match transcoder.cut(&self.input_path, segment.start, segment.end, &output_path) {
                Ok(()) => {
                    log::info!(
                        "Cut {} covering [{}s, {}s)",
                        output_path.display(),
                        segment.start,
                        segment.end,
                    );
                    completed.push(segment.clone());
                }
                Err(error) => {
                    log::error!("Failed to cut {}: {error}", output_path.display());
                    failed.push((segment.clone(), error));
                }
            }

            self.progress.on_progress(&ProgressInfo {
                current: segment.index as u64,
                total: Some(plan.len() as u64),
            });
        }

        Ok(SegmentReport {
            output_dir: self.output_dir.clone(),
            completed,
            failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        path::{Path, PathBuf},
        sync::Mutex,
    };

    use tempfile::tempdir;

    use super::{Segment, Segmenter, plan_segments};
    use crate::{error::FramePickError, transcoder::Transcoder};

    /// Records every requested cut; fails the segments listed in `fail_on`.
    struct RecordingTranscoder {
        cuts: Mutex<Vec<(PathBuf, f64, f64, PathBuf)>>,
        fail_on: Vec<usize>,
    }

    impl RecordingTranscoder {
        fn new(fail_on: Vec<usize>) -> Self {
            Self {
                cuts: Mutex::new(Vec::new()),
                fail_on,
            }
        }
    }

    impl Transcoder for RecordingTranscoder {
        fn cut(
            &self,
            input: &Path,
            start_seconds: f64,
            end_seconds: f64,
            output: &Path,
        ) -> Result<(), FramePickError> {
            let mut cuts = self.cuts.lock().unwrap();
            cuts.push((
                input.to_path_buf(),
                start_seconds,
                end_seconds,
                output.to_path_buf(),
            ));
            if self.fail_on.contains(&cuts.len()) {
                return Err(FramePickError::TranscodeFailed {
                    output: output.to_path_buf(),
                    reason: "exited with status 1".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn plan_for_65_seconds_in_30s_segments() {
        let plan = plan_segments(65.0, 30.0);
        assert_eq!(
            plan,
            vec![
                Segment {
                    index: 1,
                    start: 0.0,
                    end: 30.0
                },
                Segment {
                    index: 2,
                    start: 30.0,
                    end: 60.0
                },
                Segment {
                    index: 3,
                    start: 60.0,
                    end: 65.0
                },
            ],
        );
        assert_eq!(plan[0].file_name(), "segment_1.mp4");
        assert_eq!(plan[2].file_name(), "segment_3.mp4");
    }

    #[test]
    fn plan_spans_are_contiguous_and_cover_the_whole_duration() {
        for (total, segment) in [(300.0, 30.0), (299.5, 60.0), (1.0, 10.0), (90.0, 45.0)] {
            let plan = plan_segments(total, segment);
            let expected_count = (total / segment).ceil() as usize;
            assert_eq!(plan.len(), expected_count, "total={total} segment={segment}");

            assert_eq!(plan.first().unwrap().start, 0.0);
            assert_eq!(plan.last().unwrap().end, total);
            for window in plan.windows(2) {
                assert_eq!(window[0].end, window[1].start);
            }
            for span in &plan {
                assert!(span.end - span.start <= segment);
                assert!(span.end > span.start);
            }
        }
    }

    #[test]
    fn zero_duration_plans_no_segments() {
        assert!(plan_segments(0.0, 30.0).is_empty());
    }

    #[test]
    fn non_positive_segment_duration_is_rejected() {
        for seconds in [0.0, -5.0, f64::NAN] {
            let result = Segmenter::new("input.mp4", "out", seconds);
            assert!(matches!(
                result,
                Err(FramePickError::InvalidSegmentDuration { .. })
            ));
        }
    }

    #[test]
    fn execute_cuts_every_planned_segment() {
        let output = tempdir().unwrap();
        let segmenter = Segmenter::new("input.mp4", output.path(), 30.0).unwrap();
        let transcoder = RecordingTranscoder::new(vec![]);

        let plan = plan_segments(65.0, 30.0);
        let report = segmenter.execute(&plan, &transcoder).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.completed.len(), 3);

        let cuts = transcoder.cuts.lock().unwrap();
        assert_eq!(cuts.len(), 3);
        assert_eq!(cuts[0].1, 0.0);
        assert_eq!(cuts[0].2, 30.0);
        assert_eq!(cuts[2].1, 60.0);
        assert_eq!(cuts[2].2, 65.0);
        assert!(cuts[1].3.ends_with("segment_2.mp4"));
    }

    #[test]
    fn failed_cuts_are_aggregated_and_do_not_abort_the_run() {
        let output = tempdir().unwrap();
        let segmenter = Segmenter::new("input.mp4", output.path(), 30.0).unwrap();
        let transcoder = RecordingTranscoder::new(vec![2]);

        let plan = plan_segments(90.0, 30.0);
        let report = segmenter.execute(&plan, &transcoder).unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.completed.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0.index, 2);

        // All three cuts were still attempted.
        assert_eq!(transcoder.cuts.lock().unwrap().len(), 3);
    }
}
