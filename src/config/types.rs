use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tabloforge_common::paths::DEFAULT_SEGMENT_EXTENSION;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub recording: RecordingConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordingConfig {
    /// Mount point of the recorder drive
    #[serde(default)]
    pub mount: Option<PathBuf>,

    /// Suffix identifying segment files (case-sensitive)
    #[serde(default = "default_segment_extension")]
    pub segment_extension: String,

    /// Concurrent ffprobe runs (0 = one per CPU, 1 = sequential)
    #[serde(default)]
    pub probe_jobs: usize,

    /// Keep the concat manifest when ffmpeg fails
    #[serde(default)]
    pub keep_manifest_on_failure: bool,
}

fn default_segment_extension() -> String {
    DEFAULT_SEGMENT_EXTENSION.to_string()
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            mount: None,
            segment_extension: default_segment_extension(),
            probe_jobs: 0,
            keep_manifest_on_failure: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory receiving `<recording id>.mp4` (tilde is expanded)
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("~/Videos")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}

impl ToolsConfig {
    /// Configured path for `tool`, if any.
    pub fn path_for(&self, tool: &str) -> Option<&Path> {
        match tool {
            "ffmpeg" => self.ffmpeg_path.as_deref(),
            "ffprobe" => self.ffprobe_path.as_deref(),
            _ => None,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ExtractOverrides {
    pub mount: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub dry_run: bool,
    pub keep_manifest: bool,
}

/// Fully resolved settings for extracting one recording.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    pub mount: PathBuf,
    pub recording_id: String,
    pub segment_extension: String,
    pub probe_jobs: usize,
    pub output_dir: PathBuf,
    pub keep_manifest_on_failure: bool,
    pub dry_run: bool,
}
