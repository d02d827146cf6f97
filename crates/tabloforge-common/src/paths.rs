//! Path utilities for the recorder's on-disk layout.
//!
//! A recording lives under `<mount>/rec/<recording id>/segs/` as a run of
//! transport-stream chunks whose file names sort into capture order. These
//! helpers resolve that layout and decide which directory entries count as
//! segments.

use std::path::{Path, PathBuf};

/// Folder under the mount point holding one sub-folder per recording.
pub const RECORDINGS_DIR: &str = "rec";

/// Folder inside a recording holding its transport-stream segments.
pub const SEGMENTS_DIR: &str = "segs";

/// Segment extension used by the recorder.
pub const DEFAULT_SEGMENT_EXTENSION: &str = ".ts";

/// Container extension of the concatenated output.
pub const OUTPUT_EXTENSION: &str = "mp4";

/// Directory holding every recording on the mounted drive.
pub fn recordings_dir(mount: &Path) -> PathBuf {
    mount.join(RECORDINGS_DIR)
}

/// Directory holding the segments of one recording.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tabloforge_common::paths::segment_dir;
///
/// assert_eq!(
///     segment_dir(Path::new("/mnt/x"), "42"),
///     Path::new("/mnt/x/rec/42/segs")
/// );
/// ```
pub fn segment_dir(mount: &Path, recording_id: &str) -> PathBuf {
    recordings_dir(mount).join(recording_id).join(SEGMENTS_DIR)
}

/// Check whether a file name is a segment.
///
/// The comparison is a case-sensitive suffix match, so `A.TS` is not a
/// segment when the extension is `.ts`.
///
/// # Examples
///
/// ```
/// use tabloforge_common::paths::is_segment_file;
///
/// assert!(is_segment_file("seg001.ts", ".ts"));
/// assert!(!is_segment_file("thumb.jpg", ".ts"));
/// assert!(!is_segment_file("SEG001.TS", ".ts"));
/// ```
pub fn is_segment_file(name: &str, extension: &str) -> bool {
    name.ends_with(extension)
}

/// Path of the concatenated output for a recording.
pub fn output_file(output_dir: &Path, recording_id: &str) -> PathBuf {
    output_dir.join(format!("{recording_id}.{OUTPUT_EXTENSION}"))
}
