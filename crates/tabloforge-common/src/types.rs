//! Core type definitions for segments and manifest entries.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Seconds subtracted from every probed segment duration.
///
/// Without it the concat demuxer overlaps the last frame of one segment with
/// the first of the next and playback visibly skips at each boundary.
pub const DURATION_GUARD_SECS: f64 = 0.5;

/// A single recorded transport-stream chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// File name inside the segment directory.
    pub name: String,
    /// Segment directory joined with `name`.
    pub path: PathBuf,
    /// Probed duration in seconds.
    pub duration_secs: f64,
}

impl Segment {
    /// Duration as written to the manifest.
    pub fn adjusted_duration(&self) -> f64 {
        self.duration_secs - DURATION_GUARD_SECS
    }
}

/// One `file` / `duration` pair of the concat manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: PathBuf,
    /// Probed duration minus [`DURATION_GUARD_SECS`]. May be non-positive
    /// for segments shorter than the guard.
    pub duration_secs: f64,
}

impl From<&Segment> for ManifestEntry {
    fn from(segment: &Segment) -> Self {
        Self {
            path: segment.path.clone(),
            duration_secs: segment.adjusted_duration(),
        }
    }
}

/// A recording folder found on the mounted drive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSummary {
    /// Folder name, which doubles as the recorder database id.
    pub id: String,
    /// Number of segment files in the recording's segment directory.
    pub segment_count: usize,
}
