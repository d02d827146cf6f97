//! Concat manifest construction.
//!
//! [`ManifestBuilder`] turns a recording's segment directory into a
//! [`Manifest`]; [`format`] renders it into the script ffmpeg's concat
//! demuxer reads.

mod builder;
pub mod format;

pub use builder::{ManifestBuilder, ProgressCallback};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tabloforge_common::{Error, ManifestEntry, Result, Segment};

/// Ordered segments of one recording, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    segments: Vec<Segment>,
}

impl Manifest {
    /// Wrap segments that are already in playback order.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// One entry per segment with the duration guard applied.
    pub fn entries(&self) -> Vec<ManifestEntry> {
        self.segments.iter().map(ManifestEntry::from).collect()
    }

    /// Playback length of the joined output in seconds.
    pub fn total_duration_secs(&self) -> f64 {
        self.segments.iter().map(Segment::adjusted_duration).sum()
    }

    /// Render the concat script.
    pub fn render(&self) -> Result<String> {
        format::render(&self.entries())
    }
}

/// Write a rendered concat script to `path`.
///
/// The file is flushed and closed before this returns, so a reader started
/// afterwards always sees the complete manifest.
pub fn write_manifest(path: &Path, rendered: &str) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    file.sync_all()?;

    tracing::debug!("Wrote manifest to {:?}", path);
    Ok(())
}
