//! Discovery of recordings on a mounted recorder drive.

use crate::manifest::ManifestBuilder;
use std::path::Path;
use tabloforge_common::paths::{recordings_dir, segment_dir};
use tabloforge_common::{Error, ErrorKind, RecordingSummary, Result};

/// List every recording folder under `<mount>/rec`, sorted by id.
///
/// A recording whose segment directory is missing is reported with zero
/// segments rather than failing the listing.
pub fn list_recordings(mount: &Path, extension: &str) -> Result<Vec<RecordingSummary>> {
    let root = recordings_dir(mount);
    let entries =
        std::fs::read_dir(&root).map_err(|e| Error::from_io(e, "recordings directory", &root))?;

    let mut recordings = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Ok(id) = entry.file_name().into_string() else {
            tracing::warn!("Skipping recording folder with non UTF-8 name: {:?}", entry.path());
            continue;
        };

        let builder = ManifestBuilder::new(segment_dir(mount, &id), extension);
        let segment_count = match builder.segment_names() {
            Ok(names) => names.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => return Err(e),
        };

        recordings.push(RecordingSummary { id, segment_count });
    }

    recordings.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(recordings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_recordings_with_counts() {
        let mount = tempfile::tempdir().unwrap();
        let segs = mount.path().join("rec/791164/segs");
        fs::create_dir_all(&segs).unwrap();
        fs::write(segs.join("00000.ts"), b"").unwrap();
        fs::write(segs.join("00001.ts"), b"").unwrap();
        fs::write(segs.join("thumb.jpg"), b"").unwrap();
        fs::create_dir_all(mount.path().join("rec/100")).unwrap();
        fs::write(mount.path().join("rec/stray.txt"), b"").unwrap();

        let recordings = list_recordings(mount.path(), ".ts").unwrap();
        assert_eq!(
            recordings,
            vec![
                RecordingSummary {
                    id: "100".into(),
                    segment_count: 0
                },
                RecordingSummary {
                    id: "791164".into(),
                    segment_count: 2
                },
            ]
        );
    }

    #[test]
    fn missing_recordings_dir() {
        let mount = tempfile::tempdir().unwrap();
        let err = list_recordings(mount.path(), ".ts").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
