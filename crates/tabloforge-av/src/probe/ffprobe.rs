//! FFprobe-based duration probing.
//!
//! Shells out to
//! `ffprobe -loglevel quiet -print_format json -show_format -show_streams <file>`
//! and reads the container duration, falling back to the first stream that
//! reports one.

use super::DurationProber;
use crate::{Error, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

const TOOL: &str = "ffprobe";

/// A prober backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    /// Path to the ffprobe binary.
    ffprobe_path: PathBuf,
}

impl FfprobeProber {
    /// Create a new prober using the given ffprobe path.
    pub fn new(ffprobe_path: PathBuf) -> Self {
        Self { ffprobe_path }
    }

    /// Create a prober that finds ffprobe on `PATH`.
    pub fn from_path() -> Option<Self> {
        which::which(TOOL).ok().map(Self::new)
    }

    /// Create a prober from an optional configured path, falling back to
    /// `PATH` lookup.
    pub fn from_config(configured: Option<&Path>) -> Result<Self> {
        crate::tools::get_tool_path(TOOL, configured).map(Self::new)
    }

    /// Path of the binary this prober runs.
    pub fn ffprobe_path(&self) -> &Path {
        &self.ffprobe_path
    }
}

impl DurationProber for FfprobeProber {
    fn name(&self) -> &'static str {
        TOOL
    }

    fn duration(&self, path: &Path) -> Result<f64> {
        if path.as_os_str().is_empty() {
            return Err(Error::invalid_argument(
                "ffprobe needs the path of a media file, got an empty path",
            ));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Probing duration of {:?}", path);

        let output = Command::new(&self.ffprobe_path)
            .args(probe_args(path))
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(TOOL)
                } else {
                    Error::Io(e)
                }
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(Error::tool_failed(
                TOOL,
                format!(
                    "exited with status {} probing {}: {}",
                    output.status,
                    path.display(),
                    stderr.trim()
                ),
            ));
        }

        let json_str = String::from_utf8(output.stdout)
            .map_err(|e| Error::parse_error(TOOL, format!("Invalid UTF-8: {}", e)))?;

        match duration_from_json(&json_str) {
            Err(Error::ParseError { tool, message }) if !stderr.trim().is_empty() => {
                Err(Error::parse_error(tool, format!("{message} (stderr: {})", stderr.trim())))
            }
            Err(Error::NotFound { what, .. }) => Err(Error::not_found(what, path)),
            other => other,
        }
    }
}

/// Build the ffprobe argument list for probing `path`; the path goes last.
pub fn probe_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-loglevel",
        "quiet",
        "-print_format",
        "json",
        "-show_format",
        "-show_streams",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    args.push(path.as_os_str().to_os_string());
    args
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    #[serde(default)]
    duration: Option<DurationField>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    #[serde(default)]
    duration: Option<DurationField>,
}

/// ffprobe prints durations as strings (`"10.732000"`); accept bare numbers
/// too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DurationField {
    Number(f64),
    Text(String),
}

impl DurationField {
    fn seconds(&self) -> Result<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.trim().parse::<f64>().map_err(|e| {
                Error::parse_error(TOOL, format!("invalid duration {:?}: {}", s, e))
            }),
        }
    }
}

/// Resolve a duration from ffprobe's JSON output.
///
/// The container duration wins; otherwise the first stream, in listed
/// order, that carries a duration. A document with neither yields
/// [`Error::NotFound`].
///
/// # Example
///
/// ```
/// use tabloforge_av::duration_from_json;
///
/// let json = r#"{"format": {"duration": "10.732000"}, "streams": []}"#;
/// assert_eq!(duration_from_json(json).unwrap(), 10.732);
/// ```
pub fn duration_from_json(json: &str) -> Result<f64> {
    let output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| Error::parse_error(TOOL, format!("JSON parse error: {}", e)))?;

    if let Some(duration) = output.format.as_ref().and_then(|f| f.duration.as_ref()) {
        return duration.seconds();
    }

    output
        .streams
        .iter()
        .find_map(|s| s.duration.as_ref())
        .map(DurationField::seconds)
        .unwrap_or_else(|| Err(Error::not_found("duration", "ffprobe output")))
}
