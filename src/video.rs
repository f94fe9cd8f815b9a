//! Video file handle and the sequential sampling decode loop.
//!
//! [`VideoFile`] is the crate's wrapper around the FFmpeg demuxer. It opens a
//! file, locates the best video stream, caches [`VideoMetadata`], and exposes
//! [`for_each_sampled_frame`](VideoFile::for_each_sampled_frame), the
//! push-based decode loop the sampler is built on.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    codec::context::Context as CodecContext,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::{error::FramePickError, metadata::VideoMetadata};

/// A single frame selected by the sampling decode loop.
///
/// Passed to the callback of
/// [`VideoFile::for_each_sampled_frame`]. The image is RGB8 at the stream's
/// native resolution.
#[derive(Debug)]
pub struct SampledFrame {
    /// Zero-based index of this frame in decode order.
    pub frame_index: u64,
    /// Presentation time of the frame in seconds.
    pub timestamp: f64,
    /// The decoded frame pixels.
    pub image: DynamicImage,
}

/// An opened video file.
///
/// Created via [`VideoFile::open`], this struct holds the demuxer context and
/// cached metadata for the best video stream.
///
/// # Example
///
/// ```no_run
/// use framepick::VideoFile;
///
/// let mut video = VideoFile::open("input.mp4")?;
/// println!("{:.2} fps", video.metadata().frames_per_second);
/// # Ok::<(), framepick::FramePickError>(())
/// ```
pub struct VideoFile {
    input_context: Input,
    metadata: VideoMetadata,
    video_stream_index: usize,
    file_path: PathBuf,
}

impl Debug for VideoFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFile")
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl VideoFile {
    /// Open a video file for sampling.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, locates the best
    /// video stream, and caches its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`FramePickError::FileOpen`] if the file cannot be opened and
    /// [`FramePickError::NoVideoStream`] if it has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FramePickError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        // Initialise ffmpeg (safe to call multiple times).
        ffmpeg_next::init().map_err(|error| FramePickError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FramePickError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let video_stream_index = input_context
            .streams()
            .best(Type::Video)
            .map(|stream| stream.index())
            .ok_or(FramePickError::NoVideoStream)?;

        // Container-level duration.
        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let stream = input_context
            .stream(video_stream_index)
            .ok_or(FramePickError::NoVideoStream)?;

        let codec_parameters = stream.parameters();
        let decoder_context =
            CodecContext::from_parameters(codec_parameters).map_err(|error| {
                FramePickError::FileOpen {
                    path: file_path.clone(),
                    reason: format!("Failed to read video codec parameters: {error}"),
                }
            })?;
        let video_decoder =
            decoder_context
                .decoder()
                .video()
                .map_err(|error| FramePickError::FileOpen {
                    path: file_path.clone(),
                    reason: format!("Failed to create video decoder: {error}"),
                })?;

        let width = video_decoder.width();
        let height = video_decoder.height();

        // Frames per second from the stream's average frame rate, falling
        // back to the raw rate field for streams that do not report one.
        let frame_rate = stream.avg_frame_rate();
        let frames_per_second = if frame_rate.denominator() != 0 {
            frame_rate.numerator() as f64 / frame_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        let frame_count = if frames_per_second > 0.0 {
            (duration.as_secs_f64() * frames_per_second) as u64
        } else {
            0
        };

        let codec = video_decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width,
            height,
            frames_per_second,
            frame_count,
            duration,
            codec,
        };

        log::info!(
            "Opened video file: {} ({}x{}, {:.2} fps, ~{} frames, codec={})",
            file_path.display(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.frame_count,
            metadata.codec,
        );

        Ok(Self {
            input_context,
            metadata,
            video_stream_index,
            file_path,
        })
    }

    /// Get a reference to the cached video metadata.
    ///
    /// Metadata is extracted once during [`open`](VideoFile::open) and does
    /// not require additional decoding.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// The path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Decode the whole video sequentially and invoke `callback` for every
    /// `interval`-th frame in decode order.
    ///
    /// Decoding starts at position 0 and never seeks. A zero-based frame
    /// index is advanced for **every** decoded frame; frames whose index is a
    /// multiple of `interval` are scaled to RGB24, converted to a
    /// [`DynamicImage`], and handed to the callback together with their
    /// index and presentation time in seconds. Non-selected frames are
    /// counted but never scaled.
    ///
    /// The decoder is flushed at end of stream, so trailing buffered frames
    /// are counted and sampled like any other.
    ///
    /// # Errors
    ///
    /// - [`FramePickError::InvalidInterval`] if `interval` is zero.
    /// - [`FramePickError::VideoDecodeError`] if frame conversion fails.
    /// - [`FramePickError::FfmpegError`] if decoding fails.
    /// - The first error returned by the callback.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use framepick::VideoFile;
    ///
    /// let mut video = VideoFile::open("input.mp4")?;
    /// video.for_each_sampled_frame(120, |frame| {
    ///     frame.image.save(format!("frame_{}.jpg", frame.frame_index))?;
    ///     Ok(())
    /// })?;
    /// # Ok::<(), framepick::FramePickError>(())
    /// ```
    pub fn for_each_sampled_frame<F>(
        &mut self,
        interval: u64,
        mut callback: F,
    ) -> Result<(), FramePickError>
    where
        F: FnMut(SampledFrame) -> Result<(), FramePickError>,
    {
        if interval == 0 {
            return Err(FramePickError::InvalidInterval);
        }

        let video_stream_index = self.video_stream_index;
        let width = self.metadata.width;
        let height = self.metadata.height;

        let stream = self
            .input_context
            .stream(video_stream_index)
            .ok_or(FramePickError::NoVideoStream)?;
        let time_base = stream.time_base();
        let codec_parameters = stream.parameters();
        let decoder_context = CodecContext::from_parameters(codec_parameters)?;
        let mut decoder = decoder_context.decoder().video()?;

        let mut scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();
        let mut frame_index: u64 = 0;

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != video_stream_index {
                continue;
            }

            decoder.send_packet(&packet)?;

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                if frame_index % interval == 0 {
                    scaler.run(&decoded_frame, &mut rgb_frame)?;
                    let image = convert_frame_to_image(&rgb_frame, width, height)?;
                    let pts = decoded_frame.pts().unwrap_or(0);
                    callback(SampledFrame {
                        frame_index,
                        timestamp: crate::utilities::pts_to_seconds(pts, time_base),
                        image,
                    })?;
                }
                frame_index += 1;
            }
        }

        // Flush the decoder.
        decoder.send_eof()?;
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            if frame_index % interval == 0 {
                scaler.run(&decoded_frame, &mut rgb_frame)?;
                let image = convert_frame_to_image(&rgb_frame, width, height)?;
                let pts = decoded_frame.pts().unwrap_or(0);
                callback(SampledFrame {
                    frame_index,
                    timestamp: crate::utilities::pts_to_seconds(pts, time_base),
                    image,
                })?;
            }
            frame_index += 1;
        }

        log::debug!(
            "Decoded {} frame(s) from {}",
            frame_index,
            self.file_path.display(),
        );

        Ok(())
    }
}

/// Convert a scaled RGB24 frame into a [`DynamicImage`].
fn convert_frame_to_image(
    rgb_frame: &VideoFrame,
    width: u32,
    height: u32,
) -> Result<DynamicImage, FramePickError> {
    let buffer = crate::utilities::frame_to_rgb_buffer(rgb_frame, width, height);
    let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        FramePickError::VideoDecodeError(
            "Failed to construct RGB image from decoded frame data".to_string(),
        )
    })?;
    Ok(DynamicImage::ImageRgb8(image))
}
