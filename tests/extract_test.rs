//! Extractor runs with a table prober and a scripted ffmpeg.

#![cfg(unix)]

mod common;

use assert_matches::assert_matches;
use common::{Drive, FakeTools, TableProber};
use serial_test::serial;
use std::path::Path;
use tabloforge::config::ExtractConfig;
use tabloforge::extract::Extractor;
use tabloforge_common::{Error, ErrorKind};

fn extract_config(mount: &Path, output_dir: &Path) -> ExtractConfig {
    ExtractConfig {
        mount: mount.to_path_buf(),
        recording_id: "42".into(),
        segment_extension: ".ts".into(),
        probe_jobs: 0,
        output_dir: output_dir.to_path_buf(),
        keep_manifest_on_failure: false,
        dry_run: false,
    }
}

#[test]
#[serial]
fn test_extract_writes_output_and_removes_manifest() {
    let drive = Drive::new();
    let segs = drive.add_recording("42", &[("seg002.ts", ""), ("seg001.ts", "")]);
    let out = tempfile::tempdir().unwrap();
    let tools = FakeTools::new();
    let prober = TableProber::new(&[("seg001.ts", 10.0), ("seg002.ts", 4.16)]);

    let report = Extractor::new(
        extract_config(drive.mount(), out.path()),
        prober,
        Some(tools.ffmpeg.clone()),
    )
    .run()
    .unwrap();

    let expected_output = out.path().join("42.mp4");
    assert_eq!(report.output.as_deref(), Some(expected_output.as_path()));
    assert!(expected_output.exists());
    assert_eq!(report.segment_count, 2);

    let expected_manifest = format!(
        "file '{}'\nduration 9.5\nfile '{}'\nduration 3.7\n",
        segs.join("seg001.ts").display(),
        segs.join("seg002.ts").display()
    );
    assert_eq!(tools.captured_manifest().unwrap(), expected_manifest);
    assert_eq!(report.manifest, expected_manifest);

    let manifest_path = tools.captured_manifest_path().unwrap();
    assert!(manifest_path.ends_with("video_seg_list.txt"));
    assert!(!manifest_path.exists());
}

#[test]
#[serial]
fn test_ffmpeg_receives_concat_arguments() {
    let drive = Drive::new();
    drive.add_recording("42", &[("a.ts", "")]);
    let out = tempfile::tempdir().unwrap();
    let tools = FakeTools::new();

    Extractor::new(
        extract_config(drive.mount(), out.path()),
        TableProber::new(&[("a.ts", 3.0)]),
        Some(tools.ffmpeg.clone()),
    )
    .run()
    .unwrap();

    let args = tools.captured_args();
    let manifest = tools
        .captured_manifest_path()
        .unwrap()
        .display()
        .to_string();
    let output = out.path().join("42.mp4").display().to_string();
    assert_eq!(
        args,
        [
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
            manifest.as_str(),
            "-c",
            "copy",
            "-bsf:a",
            "aac_adtstoasc",
            "-movflags",
            "+faststart",
            "-y",
            output.as_str(),
        ]
    );
}

#[test]
#[serial]
fn test_probe_failure_never_runs_ffmpeg() {
    let drive = Drive::new();
    drive.add_recording("42", &[("a.ts", ""), ("b.ts", "")]);
    let out = tempfile::tempdir().unwrap();
    let tools = FakeTools::new();

    let err = Extractor::new(
        extract_config(drive.mount(), out.path()),
        TableProber::new(&[("a.ts", 3.0)]),
        Some(tools.ffmpeg.clone()),
    )
    .run()
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(tools.captured_manifest().is_none());
    assert!(!out.path().join("42.mp4").exists());
}

#[test]
#[serial]
fn test_ffmpeg_failure_removes_manifest() {
    let drive = Drive::new();
    drive.add_recording("42", &[("a.ts", "")]);
    let out = tempfile::tempdir().unwrap();
    let tools = FakeTools::with_ffmpeg_exit(1);

    let err = Extractor::new(
        extract_config(drive.mount(), out.path()),
        TableProber::new(&[("a.ts", 3.0)]),
        Some(tools.ffmpeg.clone()),
    )
    .run()
    .unwrap_err();

    assert_matches!(err, Error::ToolFailed { ref tool, ref message }
        if tool == "ffmpeg" && message.contains("concat demuxer exploded"));
    assert!(!tools.captured_manifest_path().unwrap().exists());
}

#[test]
#[serial]
fn test_ffmpeg_failure_keeps_manifest_when_asked() {
    let drive = Drive::new();
    drive.add_recording("42", &[("a.ts", "")]);
    let out = tempfile::tempdir().unwrap();
    let tools = FakeTools::with_ffmpeg_exit(3);
    let mut config = extract_config(drive.mount(), out.path());
    config.keep_manifest_on_failure = true;

    let err = Extractor::new(
        config,
        TableProber::new(&[("a.ts", 3.0)]),
        Some(tools.ffmpeg.clone()),
    )
    .run()
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExternalToolFailure);

    let kept = tools.captured_manifest_path().unwrap();
    assert!(kept.exists());
    assert_eq!(
        std::fs::read_to_string(&kept).unwrap(),
        tools.captured_manifest().unwrap()
    );
    std::fs::remove_dir_all(kept.parent().unwrap()).unwrap();
}
