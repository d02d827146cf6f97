use super::Manifest;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tabloforge_av::DurationProber;
use tabloforge_common::paths::{is_segment_file, segment_dir};
use tabloforge_common::{Error, Result, Segment};

/// Progress callback type: `(index, total, segment)`, called once per probed
/// segment. With parallel probing the calls arrive from worker threads in
/// completion order.
pub type ProgressCallback = Box<dyn Fn(usize, usize, &Segment) + Send + Sync>;

/// Builds the manifest for one recording's segment directory.
pub struct ManifestBuilder {
    segment_dir: PathBuf,
    extension: String,
    jobs: usize,
    progress_callback: Option<ProgressCallback>,
}

impl ManifestBuilder {
    /// Builder for the segments directly inside `segment_dir`.
    pub fn new(segment_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            segment_dir: segment_dir.into(),
            extension: extension.into(),
            jobs: 0,
            progress_callback: None,
        }
    }

    /// Builder for recording `recording_id` on the drive mounted at `mount`.
    pub fn for_recording(mount: &Path, recording_id: &str, extension: impl Into<String>) -> Self {
        Self::new(segment_dir(mount, recording_id), extension)
    }

    /// Number of concurrent probes. `0` uses one per CPU, `1` probes
    /// sequentially.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn segment_dir(&self) -> &Path {
        &self.segment_dir
    }

    /// Segment file names in playback order.
    ///
    /// Only regular files are considered; subdirectories and symlinks are
    /// ignored. Names are sorted before filtering by extension.
    pub fn segment_names(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.segment_dir)
            .map_err(|e| Error::from_io(e, "segment directory", &self.segment_dir))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!("Skipping file with non UTF-8 name: {:?}", raw);
                }
            }
        }

        names.sort();
        names.retain(|name| {
            let keep = is_segment_file(name, &self.extension);
            if !keep {
                tracing::debug!("Skipping non-segment file: {}", name);
            }
            keep
        });

        Ok(names)
    }

    /// Probe every segment and assemble the manifest.
    ///
    /// The first probe failure aborts the build; nothing is returned for
    /// the segments that did succeed.
    pub fn build(&self, prober: &dyn DurationProber) -> Result<Manifest> {
        let names = self.segment_names()?;
        if names.is_empty() {
            return Err(Error::not_found(
                format!("segments matching *{}", self.extension),
                &self.segment_dir,
            ));
        }

        let total = names.len();
        let jobs = self.effective_jobs(total);
        tracing::info!(
            "Probing {} segments in {:?} with {} ({} job(s))",
            total,
            self.segment_dir,
            prober.name(),
            jobs
        );

        let segments = if jobs == 1 {
            names
                .iter()
                .enumerate()
                .map(|(i, name)| self.probe_segment(prober, i, total, name))
                .collect::<Result<Vec<_>>>()?
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .thread_name(|i| format!("tabloforge-probe-{i}"))
                .build()
                .map_err(|e| Error::Io(std::io::Error::other(e)))?;

            // Indexed collect keeps segment order regardless of which
            // probe finishes first.
            pool.install(|| {
                names
                    .par_iter()
                    .enumerate()
                    .map(|(i, name)| self.probe_segment(prober, i, total, name))
                    .collect::<Result<Vec<_>>>()
            })?
        };

        Ok(Manifest::new(segments))
    }

    fn effective_jobs(&self, total: usize) -> usize {
        let requested = if self.jobs == 0 {
            num_cpus::get()
        } else {
            self.jobs
        };
        requested.clamp(1, total.max(1))
    }

    fn probe_segment(
        &self,
        prober: &dyn DurationProber,
        index: usize,
        total: usize,
        name: &str,
    ) -> Result<Segment> {
        let path = self.segment_dir.join(name);
        let duration_secs = prober.duration(&path)?;

        let segment = Segment {
            name: name.to_string(),
            path,
            duration_secs,
        };

        if segment.adjusted_duration() <= 0.0 {
            tracing::warn!(
                "Segment {} is only {:.3}s long; its manifest duration is not positive",
                name,
                duration_secs
            );
        }

        tracing::debug!("Processed file: {} ({:.3}s)", name, duration_secs);
        if let Some(ref cb) = self.progress_callback {
            cb(index, total, &segment);
        }

        Ok(segment)
    }
}
