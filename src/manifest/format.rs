//! Rendering of the ffmpeg concat script.
//!
//! Two lines per entry, each terminated by `\n`:
//!
//! ```text
//! file '/mnt/x/rec/42/segs/seg001.ts'
//! duration 10.2
//! ```

use std::fmt::Write as _;
use std::path::Path;
use tabloforge_common::{Error, ManifestEntry, Result};

/// Render a duration with one decimal digit.
///
/// Rounding is done on the exact binary value of `secs`; an exact tie
/// rounds to the even digit (`10.25` → `10.2`, `10.75` → `10.8`).
pub fn format_duration(secs: f64) -> String {
    format!("{secs:.1}")
}

/// Quote a path for a `file` directive.
///
/// The path is wrapped in single quotes. An embedded quote closes the quoted
/// run, is emitted backslash-escaped and the run is reopened, which is how
/// the concat demuxer's tokenizer expects it.
///
/// # Errors
///
/// Paths that are not valid UTF-8 cannot be written to the script.
pub fn quote_path(path: &Path) -> Result<String> {
    let s = path.to_str().ok_or_else(|| {
        Error::invalid_argument(format!("segment path is not valid UTF-8: {:?}", path))
    })?;
    Ok(format!("'{}'", s.replace('\'', r"'\''")))
}

/// Render every entry, in order.
pub fn render(entries: &[ManifestEntry]) -> Result<String> {
    let mut out = String::new();
    for entry in entries {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "file {}", quote_path(&entry.path)?);
        let _ = writeln!(out, "duration {}", format_duration(entry.duration_secs));
    }
    Ok(out)
}
