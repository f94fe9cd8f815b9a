//! The CSV frame manifest.
//!
//! Every sampled frame gets one row in a CSV sidecar next to the images:
//! the image file name, the source video file name, and the frame's
//! presentation time in seconds. The header is written as soon as the
//! manifest is created, so a run that samples nothing still produces a
//! valid, header-only file.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::FramePickError;

/// Column names of the manifest, in order.
pub const MANIFEST_HEADER: [&str; 3] = ["image_name", "video_name", "timestamp"];

/// One sampled frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// File name of the written image (e.g. `image_7.jpg`).
    pub image_name: String,
    /// File name of the source video.
    pub video_name: String,
    /// Presentation time of the frame in seconds.
    pub timestamp: f64,
}

/// Append-only writer for the frame manifest.
///
/// Rows are written in insertion order and buffered; [`finish`](Self::finish)
/// flushes everything to disk. Creating a manifest truncates any existing
/// file at the same path.
pub struct FrameManifest {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows: u64,
}

impl FrameManifest {
    /// Create (or truncate) the manifest at `path` and write the header row.
    ///
    /// # Errors
    ///
    /// Returns [`FramePickError::CsvError`] if the file cannot be created or
    /// the header cannot be written.
    pub fn create<P: Into<PathBuf>>(path: P) -> Result<Self, FramePickError> {
        let path = path.into();

        // Headers are written by hand so they exist even with zero records;
        // serde-driven serialization below must not repeat them.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(MANIFEST_HEADER)?;

        log::debug!("Created frame manifest at {}", path.display());

        Ok(Self {
            writer,
            path,
            rows: 0,
        })
    }

    /// Append one record.
    pub fn append(&mut self, record: &FrameRecord) -> Result<(), FramePickError> {
        self.writer.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows appended so far (the header is not counted).
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// The path the manifest is being written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush all buffered rows to disk and return the data-row count.
    pub fn finish(mut self) -> Result<u64, FramePickError> {
        self.writer.flush().map_err(FramePickError::IoError)?;
        log::info!("Wrote {} manifest row(s) to {}", self.rows, self.path.display());
        Ok(self.rows)
    }
}
