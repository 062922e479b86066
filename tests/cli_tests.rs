//! Binary-level tests that never reach ffmpeg or the network

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `clipgen` running inside an isolated directory with no ambient config
fn clipgen(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("clipgen").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("CLIPGEN_CONFIG")
        .env_remove("RUST_LOG");
    for key in [
        "FFMPEG_PATH",
        "FFPROBE_PATH",
        "YTDLP_PATH",
        "CHUNK_DURATION",
        "SCALE",
        "FORMAT",
        "OVERWRITE_POLICY",
        "LOG_LEVEL",
    ] {
        cmd.env_remove(format!("CLIPGEN_{}", key));
    }
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    clipgen(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("split"))
        .stdout(predicate::str::contains("probe"))
        .stdout(predicate::str::contains("fetch"));
}

#[test]
fn test_split_without_source_fails() {
    let dir = TempDir::new().unwrap();
    clipgen(&dir)
        .args(["split", "--output-dir", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please provide a video URL or a local video file",
        ));
}

#[test]
fn test_split_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    clipgen(&dir)
        .args(["split", "--input", "v.mp4", "--output-dir", ".", "--format", "webm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_split_rejects_zero_chunk_duration() {
    let dir = TempDir::new().unwrap();
    clipgen(&dir)
        .args(["split", "--input", "v.mp4", "--output-dir", ".", "-d", "0"])
        .assert()
        .failure();
}

#[test]
fn test_split_missing_output_dir_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("v.mp4"), b"not really a video").unwrap();
    clipgen(&dir)
        .args(["split", "--input", "v.mp4", "--output-dir", "missing", "--no-progress"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid output directory"));
}

#[test]
fn test_probe_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    clipgen(&dir)
        .args(["probe", "--input", "does-not-exist.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_config_file_value_is_validated() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("clipgen.toml"),
        "[clipgen]\nscale = \"wide\"\n",
    )
    .unwrap();
    clipgen(&dir)
        .args(["probe", "--input", "v.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_env_chunk_duration_above_one_day_is_rejected() {
    let dir = TempDir::new().unwrap();
    clipgen(&dir)
        .env("CLIPGEN_CHUNK_DURATION", "100000")
        .args(["probe", "--input", "v.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
