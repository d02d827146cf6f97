//! Media processing actions.
//!
//! Currently a single operation: joining transport-stream segments into one
//! MP4 through the ffmpeg concat demuxer.

mod concat;

pub use concat::{concat_args, concat_remux};
