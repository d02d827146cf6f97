//! # tabloforge-av
//!
//! External media tool plumbing for tabloforge.
//!
//! This crate provides functionality for:
//! - Probing a segment's duration with `ffprobe`
//! - Joining segments losslessly with the `ffmpeg` concat demuxer
//! - Locating the external tools
//! - A temporary workspace that owns the concat manifest
//!
//! ## Features
//!
//! - `remux` - Concat remuxing using ffmpeg
//! - `all` - Enable all features
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use tabloforge_av::{DurationProber, FfprobeProber};
//! use std::path::Path;
//!
//! let prober = FfprobeProber::from_path().expect("ffprobe on PATH");
//! let secs = prober.duration(Path::new("/mnt/tablo/rec/42/segs/00001.ts"))?;
//! println!("{secs:.3} seconds");
//! # Ok::<(), tabloforge_common::Error>(())
//! ```

pub mod probe;
pub mod tools;
pub mod workspace;

#[cfg(feature = "remux")]
pub mod actions;

// Re-exports
pub use probe::{duration_from_json, probe_args, DurationProber, FfprobeProber};
pub use tabloforge_common::{Error, Result};
pub use tools::{
    check_tool, check_tool_at, check_tools, check_tools_with, get_tool_path, require_tool, ToolInfo,
};
pub use workspace::Workspace;

