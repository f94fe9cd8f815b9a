//! Progress reporting support.
//!
//! This module provides [`ProgressCallback`] for monitoring long runs and
//! [`ProgressInfo`] for progress snapshots. The sampler reports once per
//! processed video; the segmenter once per cut segment.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framepick::{FramePickError, ProgressCallback, ProgressInfo, Sampler};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(total) = info.total {
//!             println!("{}/{total}", info.current);
//!         }
//!     }
//! }
//!
//! let report = Sampler::new("videos/")
//!     .with_progress(Arc::new(PrintProgress))
//!     .run()?;
//! # Ok::<(), FramePickError>(())
//! ```

/// A snapshot of run progress.
///
/// Delivered to [`ProgressCallback::on_progress`] after each completed unit
/// of work (one video, or one segment).
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// How many units have been processed so far.
    pub current: u64,
    /// Total units expected, if known ahead of time.
    pub total: Option<u64>,
}

/// Trait for receiving progress updates during a run.
///
/// Implementations must be [`Send`] and [`Sync`].
///
/// Progress callbacks are **infallible** — they observe but cannot halt the
/// operation.
pub trait ProgressCallback: Send + Sync {
    /// Called after each completed unit of work.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}
