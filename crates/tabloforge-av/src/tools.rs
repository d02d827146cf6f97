//! External tool detection and management.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Tools the extraction pipeline shells out to.
pub const REQUIRED_TOOLS: &[&str] = &["ffprobe", "ffmpeg"];

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

impl ToolInfo {
    fn unavailable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        }
    }
}

/// Check if a tool is available and get its information.
///
/// ffmpeg and ffprobe only understand the single-dash `-version` flag.
///
/// # Example
///
/// ```no_run
/// use tabloforge_av::check_tool;
///
/// let info = check_tool("ffprobe");
/// if info.available {
///     println!("ffprobe version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(name: &str) -> ToolInfo {
    check_tool_with_arg(name, "-version")
}

/// Check if a tool is available using a custom version argument.
pub fn check_tool_with_arg(name: &str, version_arg: &str) -> ToolInfo {
    match which::which(name) {
        Ok(path) => check_tool_at(name, &path, version_arg),
        Err(_) => ToolInfo::unavailable(name),
    }
}

/// Check the binary at `path`, reporting it under `name`.
pub fn check_tool_at(name: &str, path: &Path, version_arg: &str) -> ToolInfo {
    match Command::new(path).arg(version_arg).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path: Some(path.to_path_buf()),
            }
        }
        _ => ToolInfo::unavailable(name),
    }
}

/// Check every tool in [`REQUIRED_TOOLS`] found on `PATH`.
pub fn check_tools() -> Vec<ToolInfo> {
    check_tools_with(|_| None)
}

/// Check every tool in [`REQUIRED_TOOLS`], trying the path `configured`
/// returns for it before `PATH`.
pub fn check_tools_with<'a, F>(configured: F) -> Vec<ToolInfo>
where
    F: Fn(&str) -> Option<&'a Path>,
{
    REQUIRED_TOOLS
        .iter()
        .map(|name| match get_tool_path(name, configured(name)) {
            Ok(path) => check_tool_at(name, &path, "-version"),
            Err(_) => ToolInfo::unavailable(name),
        })
        .collect()
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Configured {} path {:?} does not exist, searching PATH",
            name,
            path
        );
    }

    require_tool(name)
}
