//! Workspace holding the transient concat manifest.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File name of the manifest inside the workspace.
pub const MANIFEST_FILE_NAME: &str = "video_seg_list.txt";

/// Temporary directory owning the concat manifest for one run.
///
/// The directory and everything in it are removed when the workspace is
/// dropped, whichever way the run ends. Call [`Workspace::keep`] to retain
/// it instead.
///
/// # Example
///
/// ```no_run
/// use tabloforge_av::Workspace;
///
/// let workspace = Workspace::new()?;
/// std::fs::write(workspace.manifest_path(), "file '/a.ts'\nduration 9.5\n")?;
/// // ... hand workspace.manifest_path() to ffmpeg ...
/// drop(workspace); // manifest removed
/// # Ok::<(), tabloforge_av::Error>(())
/// ```
#[derive(Debug)]
pub struct Workspace {
    temp_dir: TempDir,
    manifest_path: PathBuf,
}

impl Workspace {
    /// Create a workspace in the system temp directory.
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix("tabloforge-")
            .tempdir()
            .map_err(Error::Io)?;
        Ok(Self::from_temp_dir(temp_dir))
    }

    /// Create a workspace inside `parent`.
    pub fn new_in<P: AsRef<Path>>(parent: P) -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix("tabloforge-")
            .tempdir_in(parent)
            .map_err(Error::Io)?;
        Ok(Self::from_temp_dir(temp_dir))
    }

    fn from_temp_dir(temp_dir: TempDir) -> Self {
        let manifest_path = temp_dir.path().join(MANIFEST_FILE_NAME);
        Self {
            temp_dir,
            manifest_path,
        }
    }

    /// Where the manifest is written.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Get the temp directory path.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Disable cleanup and return the retained manifest path.
    pub fn keep(self) -> PathBuf {
        let manifest_path = self.manifest_path;
        let _dir = self.temp_dir.keep();
        manifest_path
    }
}
