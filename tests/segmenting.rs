//! Segmenting integration tests.
//!
//! The full run against a real video is gated on the presence of a fixture;
//! the cutting loop itself is covered against a recording transcoder in the
//! `segment` module's unit tests.

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use framepick::{FramePickError, Segmenter, Transcoder, plan_segments};

struct RecordingTranscoder {
    cuts: Mutex<Vec<(f64, f64, PathBuf)>>,
}

impl Transcoder for RecordingTranscoder {
    fn cut(
        &self,
        _input: &Path,
        start_seconds: f64,
        end_seconds: f64,
        output: &Path,
    ) -> Result<(), FramePickError> {
        self.cuts
            .lock()
            .unwrap()
            .push((start_seconds, end_seconds, output.to_path_buf()));
        Ok(())
    }
}

#[test]
fn segment_count_is_duration_over_length_rounded_up() {
    assert_eq!(plan_segments(300.0, 30.0).len(), 10);
    assert_eq!(plan_segments(301.0, 30.0).len(), 11);
    assert_eq!(plan_segments(29.0, 30.0).len(), 1);
    assert!(plan_segments(0.0, 30.0).is_empty());
}

#[test]
fn last_segment_is_clamped_to_the_video_end() {
    let plan = plan_segments(65.0, 30.0);
    let last = plan.last().unwrap();
    assert_eq!(last.start, 60.0);
    assert_eq!(last.end, 65.0);
    assert!(last.end - last.start <= 30.0);
}

#[test]
fn unreadable_input_is_fatal_for_the_invocation() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let segmenter = Segmenter::new("this_file_does_not_exist.mp4", output.path(), 30.0)
        .expect("Failed to build segmenter");

    let transcoder = RecordingTranscoder {
        cuts: Mutex::new(Vec::new()),
    };
    let result = segmenter.run(&transcoder);
    assert!(matches!(result, Err(FramePickError::FileOpen { .. })));
    assert!(transcoder.cuts.lock().unwrap().is_empty());
}

#[test]
fn run_cuts_sequentially_named_contiguous_segments() {
    let fixture = "tests/fixtures/sample_video.mp4";
    if !Path::new(fixture).exists() {
        return;
    }

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let segmenter =
        Segmenter::new(fixture, output.path(), 2.0).expect("Failed to build segmenter");

    let transcoder = RecordingTranscoder {
        cuts: Mutex::new(Vec::new()),
    };
    let report = segmenter.run(&transcoder).expect("Segmenting run failed");
    assert!(report.is_complete());

    let cuts = transcoder.cuts.lock().unwrap();
    assert_eq!(cuts.len(), report.completed.len());

    let mut expected_start = 0.0;
    for (index, (start, end, path)) in cuts.iter().enumerate() {
        assert_eq!(*start, expected_start);
        assert!(*end > *start);
        assert!(
            path.ends_with(format!("segment_{}.mp4", index + 1)),
            "unexpected segment name: {}",
            path.display(),
        );
        expected_start = *end;
    }
}
