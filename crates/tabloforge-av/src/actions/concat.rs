//! Lossless segment concatenation with the ffmpeg concat demuxer.

use crate::{Error, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Lines of ffmpeg stderr kept in a failure message.
const STDERR_TAIL_LINES: usize = 20;

/// Build the ffmpeg argument list for joining a concat manifest into `output`.
///
/// Streams are copied, never re-encoded. `-safe 0` is needed because the
/// manifest lists absolute paths, and `aac_adtstoasc` converts transport
/// stream AAC framing into what the MP4 muxer expects.
pub fn concat_args(manifest: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-f", "concat", "-safe", "0", "-i"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(manifest.as_os_str().to_os_string());
    args.extend(
        [
            "-c",
            "copy",
            "-bsf:a",
            "aac_adtstoasc",
            "-movflags",
            "+faststart",
            "-y",
        ]
        .iter()
        .map(OsString::from),
    );
    args.push(output.as_os_str().to_os_string());
    args
}

/// Concatenate the segments listed in `manifest` into `output`.
///
/// Blocks until ffmpeg exits. An existing `output` is overwritten; its
/// parent directory is created when missing.
pub fn concat_remux(ffmpeg: &Path, manifest: &Path, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Concatenating {:?} into {:?}", manifest, output);

    let result = Command::new(ffmpeg)
        .args(concat_args(manifest, output))
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffmpeg")
            } else {
                Error::Io(e)
            }
        })?;

    let stderr = String::from_utf8_lossy(&result.stderr);

    #[cfg(feature = "tracing")]
    {
        tracing::debug!("ffmpeg stdout: {}", String::from_utf8_lossy(&result.stdout));
        tracing::debug!("ffmpeg stderr: {}", stderr);
    }

    if !result.status.success() {
        return Err(Error::tool_failed(
            "ffmpeg",
            format!("exited with status {}: {}", result.status, stderr_tail(&stderr)),
        ));
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Concat complete: {:?}", output);

    Ok(())
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
