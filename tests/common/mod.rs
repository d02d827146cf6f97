//! Shared fixtures for integration tests.
//!
//! [`Drive`] lays out a fake recorder drive in a temp directory. On unix,
//! [`FakeTools`] writes shell stand-ins for ffprobe and ffmpeg so the full
//! extraction path can run without FFmpeg installed.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tabloforge_av::DurationProber;
use tabloforge_common::paths::segment_dir;
use tabloforge_common::{Error, Result};
use tempfile::TempDir;

/// A temp directory shaped like a mounted recorder drive.
pub struct Drive {
    pub root: TempDir,
}

impl Drive {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("failed to create temp drive"),
        }
    }

    pub fn mount(&self) -> &Path {
        self.root.path()
    }

    /// Create `<mount>/rec/<id>/segs` holding `files`, each with the given
    /// contents. Returns the segment directory.
    pub fn add_recording(&self, id: &str, files: &[(&str, &str)]) -> PathBuf {
        let segs = segment_dir(self.mount(), id);
        fs::create_dir_all(&segs).expect("failed to create segment dir");
        for (name, contents) in files {
            fs::write(segs.join(name), contents).expect("failed to write segment");
        }
        segs
    }
}

/// Answers from a name -> duration table and counts calls.
pub struct TableProber {
    durations: HashMap<String, f64>,
    calls: AtomicUsize,
}

impl TableProber {
    pub fn new(pairs: &[(&str, f64)]) -> Self {
        Self {
            durations: pairs.iter().map(|(n, d)| (n.to_string(), *d)).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DurationProber for TableProber {
    fn name(&self) -> &'static str {
        "table"
    }

    fn duration(&self, path: &Path) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.durations
            .get(name)
            .copied()
            .ok_or_else(|| Error::not_found("duration", path))
    }
}

/// Shell stand-ins for ffprobe and ffmpeg.
///
/// The fake ffprobe records its arguments in `ffprobe.args` and reports the
/// segment file's contents as the container duration; an empty segment
/// yields no duration at all. The fake ffmpeg copies its manifest to
/// `manifest.copy`, records the manifest's path in `manifest.path` and
/// creates an empty output file.
#[cfg(unix)]
pub struct FakeTools {
    pub dir: TempDir,
    pub ffprobe: PathBuf,
    pub ffmpeg: PathBuf,
}

#[cfg(unix)]
impl FakeTools {
    pub fn new() -> Self {
        Self::with_ffmpeg_exit(0)
    }

    /// Fake tools whose ffmpeg exits with `code` after capturing its input.
    pub fn with_ffmpeg_exit(code: i32) -> Self {
        let dir = tempfile::tempdir().expect("failed to create tool dir");
        let capture = dir.path().display().to_string();

        let ffprobe = write_script(
            dir.path(),
            "ffprobe",
            &format!(
                r#"printf '%s\n' "$@" > "{capture}/ffprobe.args"
for arg in "$@"; do file="$arg"; done
d=$(cat "$file")
if [ -z "$d" ]; then
  echo '{{"format":{{}},"streams":[]}}'
else
  printf '{{"format":{{"duration":"%s"}},"streams":[]}}\n' "$d"
fi
"#
            ),
        );

        let ffmpeg = write_script(
            dir.path(),
            "ffmpeg",
            &format!(
                r#"prev=""
for arg in "$@"; do
  if [ "$prev" = "-i" ]; then manifest="$arg"; fi
  prev="$arg"
  out="$arg"
done
cp "$manifest" "{capture}/manifest.copy"
printf '%s' "$manifest" > "{capture}/manifest.path"
printf '%s\n' "$@" > "{capture}/ffmpeg.args"
if [ {code} -ne 0 ]; then
  echo "concat demuxer exploded" >&2
  exit {code}
fi
: > "$out"
"#
            ),
        );

        Self {
            dir,
            ffprobe,
            ffmpeg,
        }
    }

    /// Manifest contents ffmpeg was given, if it ran.
    pub fn captured_manifest(&self) -> Option<String> {
        fs::read_to_string(self.dir.path().join("manifest.copy")).ok()
    }

    /// Where the manifest lived while ffmpeg ran.
    pub fn captured_manifest_path(&self) -> Option<PathBuf> {
        fs::read_to_string(self.dir.path().join("manifest.path"))
            .ok()
            .map(PathBuf::from)
    }

    /// Arguments ffmpeg received, one per element.
    pub fn captured_args(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("ffmpeg.args"))
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Arguments of the most recent ffprobe run, one per element.
    pub fn captured_ffprobe_args(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("ffprobe.args"))
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// A config file pointing `[tools]` at the fakes.
    pub fn write_config(&self, extra: &str) -> PathBuf {
        let path = self.dir.path().join("tabloforge.toml");
        let contents = format!(
            "[tools]\nffprobe_path = \"{}\"\nffmpeg_path = \"{}\"\n\n{}",
            self.ffprobe.display(),
            self.ffmpeg.display(),
            extra
        );
        fs::write(&path, contents).expect("failed to write config");
        path
    }
}

#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    {
        let mut file = fs::File::create(&path).expect("failed to create script");
        writeln!(file, "#!/bin/sh").unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.sync_all().unwrap();
    }
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
