mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tabloforge_common::Error;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./tabloforge.toml",
        "~/.config/tabloforge/config.toml",
        "/etc/tabloforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    let ext = &config.recording.segment_extension;
    if ext.len() < 2 || !ext.starts_with('.') {
        anyhow::bail!(
            "Segment extension must start with '.' and name a suffix, got {:?}",
            ext
        );
    }

    if config.output.dir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    if let Some(ref mount) = config.recording.mount {
        if !mount.exists() {
            tracing::warn!("Mount location does not exist: {:?}", mount);
        }
    }

    Ok(())
}

/// Reject recording ids that would escape the recordings directory.
pub fn validate_recording_id(id: &str) -> tabloforge_common::Result<()> {
    if id.is_empty() {
        return Err(Error::invalid_argument("recording id cannot be empty"));
    }
    if id == "." || id == ".." || id.contains(['/', '\\']) {
        return Err(Error::invalid_argument(format!(
            "recording id must be a single folder name, got {:?}",
            id
        )));
    }
    Ok(())
}

/// Expand a leading `~` in a configured path.
pub fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

impl Config {
    /// Resolve the settings for extracting `recording_id`.
    pub fn extract_config(
        &self,
        recording_id: &str,
        overrides: &ExtractOverrides,
    ) -> Result<ExtractConfig> {
        validate_recording_id(recording_id)?;

        let mount = overrides
            .mount
            .clone()
            .or_else(|| self.recording.mount.clone())
            .context("No mount location configured; pass --mount or set [recording] mount")?;

        let output_dir = overrides
            .output_dir
            .clone()
            .unwrap_or_else(|| self.output.dir.clone());

        // The manifest lives in a temp dir and ffmpeg resolves relative
        // entries against it, so segment paths must be absolute.
        let mount = expand_path(&mount);
        let mount = std::path::absolute(&mount)
            .with_context(|| format!("Failed to resolve mount location {:?}", mount))?;

        Ok(ExtractConfig {
            mount,
            recording_id: recording_id.to_string(),
            segment_extension: self.recording.segment_extension.clone(),
            probe_jobs: overrides.jobs.unwrap_or(self.recording.probe_jobs),
            output_dir: expand_path(&output_dir),
            keep_manifest_on_failure: overrides.keep_manifest
                || self.recording.keep_manifest_on_failure,
            dry_run: overrides.dry_run,
        })
    }
}
