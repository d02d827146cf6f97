//! Segment duration probing.
//!
//! The manifest builder only needs one number per segment, so probing is a
//! single-method trait. [`FfprobeProber`] is the real backend; tests plug in
//! their own implementations.

mod ffprobe;

pub use ffprobe::{duration_from_json, probe_args, FfprobeProber};

use crate::Result;
use std::path::Path;

/// Something that can report a media file's duration.
pub trait DurationProber: Send + Sync {
    /// Short backend name for log messages.
    fn name(&self) -> &'static str;

    /// Duration of the media file at `path`, in seconds.
    ///
    /// Every call inspects the file afresh; implementations do not cache.
    fn duration(&self, path: &Path) -> Result<f64>;
}

impl<P: DurationProber + ?Sized> DurationProber for &P {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn duration(&self, path: &Path) -> Result<f64> {
        (**self).duration(path)
    }
}
