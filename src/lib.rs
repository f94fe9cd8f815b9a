//! # framepick
//!
//! Sample still frames from video files at a fixed cadence — recording one
//! CSV manifest row per frame — and split videos into fixed-duration
//! segments.
//!
//! Frame decoding is powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; segment cuts
//! are delegated to an external stream-copy transcode process behind the
//! [`Transcoder`] trait.
//!
//! ## Quick Start
//!
//! ### Sample frames
//!
//! ```no_run
//! use framepick::Sampler;
//!
//! // Every 120th frame of every video in the directory, as
//! // image_1.jpg, image_2.jpg, … plus frames_info.csv.
//! let report = Sampler::new("recordings/").run().unwrap();
//! println!("sampled {} frame(s)", report.frames_sampled);
//! ```
//!
//! ### Split a video into clips
//!
//! ```no_run
//! use framepick::{FfmpegCommand, Segmenter};
//!
//! let report = Segmenter::new("talk.mp4", "clips", 30.0)
//!     .unwrap()
//!     .run(&FfmpegCommand::new())
//!     .unwrap();
//! assert!(report.is_complete());
//! ```
//!
//! ## Behavior
//!
//! - **Sampling cadence** — every 120th decoded frame (0-indexed), fixed.
//! - **Image numbering** — `image_<n>.jpg` with `n` starting at 1 and
//!   increasing across *all* videos of a run; numbers are never reused.
//! - **Manifest** — `image_name,video_name,timestamp` header always present,
//!   one row per sampled frame in discovery order, timestamps in seconds.
//! - **Discovery** — `.mp4`, `.avi`, `.mov`, `.mkv` (case-insensitive),
//!   sorted lexicographically by file name.
//! - **Resilience** — a video that fails to open or decode is skipped with a
//!   diagnostic; a segment whose transcode fails is recorded in the report
//!   and the remaining segments are still cut.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system, and the
//! segmenter expects an `ffmpeg` binary on `PATH` (or configured via
//! [`FfmpegCommand::with_binary`]).

pub mod error;
pub mod ffmpeg;
pub mod manifest;
pub mod metadata;
pub mod progress;
pub mod sampler;
pub mod segment;
pub mod source;
pub mod transcoder;
mod utilities;
pub mod video;

pub use error::FramePickError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use manifest::{FrameManifest, FrameRecord, MANIFEST_HEADER};
pub use metadata::VideoMetadata;
pub use progress::{ProgressCallback, ProgressInfo};
pub use sampler::{DEFAULT_CSV_FILENAME, SAMPLE_INTERVAL, SampleReport, Sampler};
pub use segment::{Segment, SegmentReport, Segmenter, plan_segments};
pub use source::{
    DEFAULT_OUTPUT_FOLDER, SourceLayout, VIDEO_EXTENSIONS, discover_videos, is_video_file,
    resolve_layout,
};
pub use transcoder::{FfmpegCommand, Transcoder};
pub use video::{SampledFrame, VideoFile};
