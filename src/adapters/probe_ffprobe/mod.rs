//! FFprobe adapter for media duration probing
//!
//! Runs `ffprobe` as a child process and reads the container duration from
//! its plain-text output.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    binary: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter using the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments that print only `format.duration` as a bare number
    pub fn duration_args(file_path: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = [
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ]
        .iter()
        .map(Into::into)
        .collect();
        args.push(file_path.as_os_str().to_os_string());
        args
    }
}

/// Parse ffprobe's single-line duration output
pub fn parse_duration_output(output: &str) -> Result<f64, DomainError> {
    let trimmed = output.trim();
    let seconds = trimmed.parse::<f64>().map_err(|_| {
        DomainError::ProbeFail(format!("unexpected ffprobe output '{}'", trimmed))
    })?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(DomainError::ProbeFail(format!(
            "ffprobe reported an invalid duration '{}'",
            trimmed
        )));
    }

    Ok(seconds)
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        debug!("Running {} on {}", self.binary.display(), file_path.display());

        let output = Command::new(&self.binary)
            .args(Self::duration_args(file_path))
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::ResourceUnavailable(format!(
                    "failed to run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            debug!(
                "ffprobe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        parse_duration_output(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_output() {
        assert_eq!(parse_duration_output("95.023000\n").unwrap(), 95.023);
        assert_eq!(parse_duration_output("  10 ").unwrap(), 10.0);
    }

    #[test]
    fn test_parse_duration_output_rejects_garbage() {
        assert!(matches!(
            parse_duration_output("N/A"),
            Err(DomainError::ProbeFail(_))
        ));
        assert!(parse_duration_output("").is_err());
        assert!(parse_duration_output("-3.0").is_err());
        assert!(parse_duration_output("inf").is_err());
    }

    #[test]
    fn test_duration_args_end_with_input() {
        let args = FFprobeAdapter::duration_args(Path::new("clip.mp4"));
        assert_eq!(args.len(), 7);
        assert_eq!(args[3], "format=duration");
        assert_eq!(args.last().unwrap(), "clip.mp4");
    }

    #[tokio::test]
    async fn test_missing_binary_is_resource_unavailable() {
        let adapter = FFprobeAdapter::new("clipgen-no-such-ffprobe");
        let result = adapter.probe_duration(Path::new("clip.mp4")).await;
        assert!(matches!(result, Err(DomainError::ResourceUnavailable(_))));
    }

    /// Write an executable shell script standing in for the real tool
    #[cfg(unix)]
    fn fake_tool(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_duration_is_probe_fail() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = fake_tool(&dir, "ffprobe", "echo N/A");

        let result = FFprobeAdapter::new(tool)
            .probe_duration(Path::new("clip.mp4"))
            .await;
        assert!(matches!(result, Err(DomainError::ProbeFail(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_ffprobe_is_probe_fail() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = fake_tool(&dir, "ffprobe", "echo 'clip.mp4: Invalid data' >&2\nexit 1");

        let result = FFprobeAdapter::new(tool)
            .probe_duration(Path::new("clip.mp4"))
            .await;
        assert!(matches!(result, Err(DomainError::ProbeFail(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reported_duration_is_parsed() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = fake_tool(&dir, "ffprobe", "echo 95.023000");

        let seconds = FFprobeAdapter::new(tool)
            .probe_duration(Path::new("clip.mp4"))
            .await
            .unwrap();
        assert_eq!(seconds, 95.023);
    }
}
