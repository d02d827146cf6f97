//! End-to-end extraction of one recording.

use crate::config::{ExtractConfig, ToolsConfig};
use crate::manifest::{write_manifest, ManifestBuilder, ProgressCallback};
use serde::Serialize;
use std::path::PathBuf;
use tabloforge_av::actions::concat_remux;
use tabloforge_av::{get_tool_path, DurationProber, FfprobeProber, Workspace};
use tabloforge_common::paths::output_file;
use tabloforge_common::{Error, Result};

/// Outcome of a successful extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    pub recording_id: String,
    pub segment_count: usize,
    /// Sum of the manifest durations.
    pub total_duration_secs: f64,
    /// Joined file; `None` on a dry run.
    pub output: Option<PathBuf>,
    /// The rendered concat manifest.
    pub manifest: String,
}

/// Drives manifest building and the concat remux for one recording.
pub struct Extractor<P: DurationProber> {
    config: ExtractConfig,
    prober: P,
    ffmpeg: Option<PathBuf>,
    progress_callback: Option<ProgressCallback>,
}

impl Extractor<FfprobeProber> {
    /// Locate ffprobe and, unless this is a dry run, ffmpeg.
    ///
    /// Both tools are resolved before any segment is probed so a missing
    /// ffmpeg is reported up front.
    pub fn from_config(config: ExtractConfig, tools: &ToolsConfig) -> Result<Self> {
        let prober = FfprobeProber::from_config(tools.ffprobe_path.as_deref())?;
        let ffmpeg = if config.dry_run {
            None
        } else {
            Some(get_tool_path("ffmpeg", tools.ffmpeg_path.as_deref())?)
        };
        Ok(Self::new(config, prober, ffmpeg))
    }
}

impl<P: DurationProber> Extractor<P> {
    pub fn new(config: ExtractConfig, prober: P, ffmpeg: Option<PathBuf>) -> Self {
        Self {
            config,
            prober,
            ffmpeg,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Where the joined file is written.
    pub fn output_path(&self) -> PathBuf {
        output_file(&self.config.output_dir, &self.config.recording_id)
    }

    /// Build the manifest, then join the segments.
    ///
    /// The manifest lives in a temporary [`Workspace`] that is removed on
    /// return. When ffmpeg fails and `keep_manifest_on_failure` is set, the
    /// workspace is kept and its path logged.
    pub fn run(self) -> Result<ExtractReport> {
        let Self {
            config,
            prober,
            ffmpeg,
            progress_callback,
        } = self;
        let output = output_file(&config.output_dir, &config.recording_id);

        let mut builder = ManifestBuilder::for_recording(
            &config.mount,
            &config.recording_id,
            config.segment_extension.as_str(),
        )
        .jobs(config.probe_jobs);
        if let Some(cb) = progress_callback {
            builder = builder.with_progress_callback(cb);
        }

        let manifest = builder.build(&prober)?;
        let rendered = manifest.render()?;
        tracing::info!(
            "Built manifest for recording {}: {} segments, {:.1}s",
            config.recording_id,
            manifest.len(),
            manifest.total_duration_secs()
        );

        let mut report = ExtractReport {
            recording_id: config.recording_id.clone(),
            segment_count: manifest.len(),
            total_duration_secs: manifest.total_duration_secs(),
            output: None,
            manifest: rendered,
        };

        if config.dry_run {
            tracing::info!("[DRY RUN] Would write {:?}", output);
            return Ok(report);
        }

        let ffmpeg = ffmpeg.ok_or_else(|| Error::tool_not_found("ffmpeg"))?;
        let workspace = Workspace::new()?;
        write_manifest(workspace.manifest_path(), &report.manifest)?;

        if let Err(e) = concat_remux(&ffmpeg, workspace.manifest_path(), &output) {
            if config.keep_manifest_on_failure {
                let kept = workspace.keep();
                tracing::warn!("Keeping manifest for inspection: {:?}", kept);
            }
            return Err(e);
        }

        report.output = Some(output);
        Ok(report)
    }
}
