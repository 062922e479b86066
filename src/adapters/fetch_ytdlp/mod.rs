//! yt-dlp download adapter
//!
//! Resolves a video URL to its highest-resolution progressive MP4 stream and
//! saves it into the output directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::ports::*;

/// Single-file MP4 that carries both audio and video, best resolution first
pub const PROGRESSIVE_MP4_FORMAT: &str = "best[ext=mp4][vcodec!=none][acodec!=none]";

/// Output template relative to the download directory
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// yt-dlp-based fetch adapter
pub struct YtDlpAdapter {
    binary: PathBuf,
}

impl YtDlpAdapter {
    /// Create new yt-dlp adapter using the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments for a single progressive download that prints the final path
    pub fn build_args(url: &str, output_dir: &Path) -> Vec<OsString> {
        vec![
            "--no-playlist".into(),
            "--no-progress".into(),
            "--no-warnings".into(),
            "-S".into(),
            "res".into(),
            "-f".into(),
            PROGRESSIVE_MP4_FORMAT.into(),
            "-P".into(),
            output_dir.as_os_str().to_os_string(),
            "-o".into(),
            OUTPUT_TEMPLATE.into(),
            "--print".into(),
            "after_move:filepath".into(),
            url.into(),
        ]
    }
}

/// Last non-empty stdout line is the path yt-dlp wrote
pub fn parse_downloaded_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}

/// Map a failed run to the matching domain error
pub fn classify_failure(stderr: &str) -> DomainError {
    let message = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .unwrap_or("yt-dlp exited without an error message")
        .to_string();

    if stderr.contains("Requested format is not available") {
        DomainError::NoMatchingStream(format!(
            "no progressive MP4 stream available ({})",
            message
        ))
    } else {
        DomainError::DownloadFail(message)
    }
}

#[async_trait]
impl FetchPort for YtDlpAdapter {
    async fn download(&self, url: &str, output_dir: &Path) -> Result<PathBuf, DomainError> {
        let args = Self::build_args(url, output_dir);
        debug!("{} {:?}", self.binary.display(), args);

        let output = Command::new(&self.binary)
            .args(&args)
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
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }

        let path = parse_downloaded_path(&String::from_utf8_lossy(&output.stdout))
            .ok_or_else(|| {
                DomainError::DownloadFail("yt-dlp did not report a downloaded file".to_string())
            })?;

        info!("Downloaded video to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_request_progressive_mp4() {
        let args = YtDlpAdapter::build_args("https://youtu.be/abc", Path::new("/tmp/out"));
        let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();

        assert_eq!(args[pos("-f") + 1], PROGRESSIVE_MP4_FORMAT);
        assert_eq!(args[pos("-P") + 1], "/tmp/out");
        assert_eq!(args[pos("--print") + 1], "after_move:filepath");
        assert!(args.iter().any(|a| a == "--no-playlist"));
        assert_eq!(args.last().unwrap(), "https://youtu.be/abc");
    }

    #[test]
    fn test_parse_downloaded_path() {
        let stdout = "\n/tmp/out/My Video.mp4\n\n";
        assert_eq!(
            parse_downloaded_path(stdout),
            Some(PathBuf::from("/tmp/out/My Video.mp4"))
        );
        assert_eq!(parse_downloaded_path("  \n"), None);
    }

    #[test]
    fn test_classify_failure() {
        let missing = classify_failure(
            "ERROR: [youtube] abc: Requested format is not available. Use --list-formats",
        );
        assert!(matches!(missing, DomainError::NoMatchingStream(_)));

        let network = classify_failure("ERROR: Unable to download webpage: timed out\n");
        assert_eq!(
            network,
            DomainError::DownloadFail("ERROR: Unable to download webpage: timed out".to_string())
        );

        assert!(matches!(classify_failure(""), DomainError::DownloadFail(_)));
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
    async fn test_unavailable_format_is_no_matching_stream() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = fake_tool(
            &dir,
            "yt-dlp",
            "echo 'ERROR: [youtube] abc: Requested format is not available' >&2\nexit 1",
        );

        let result = YtDlpAdapter::new(tool)
            .download("https://youtu.be/abc", dir.path())
            .await;
        assert!(matches!(result, Err(DomainError::NoMatchingStream(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_printed_path_is_returned() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = fake_tool(&dir, "yt-dlp", "echo '/downloads/Some Talk.mp4'");

        let path = YtDlpAdapter::new(tool)
            .download("https://youtu.be/abc", dir.path())
            .await
            .unwrap();
        assert_eq!(path, PathBuf::from("/downloads/Some Talk.mp4"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_silent_success_is_download_fail() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = fake_tool(&dir, "yt-dlp", "exit 0");

        let result = YtDlpAdapter::new(tool)
            .download("https://youtu.be/abc", dir.path())
            .await;
        assert!(matches!(result, Err(DomainError::DownloadFail(_))));
    }
}
