//! FFmpeg execution adapter
//!
//! Extracts one segment per invocation by spawning `ffmpeg` and waiting for
//! it to exit.

use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::{EncodingPolicy, OverwriteGuard};
use crate::ports::*;

/// Keep at most this much of ffmpeg's stderr in error messages
const STDERR_TAIL_CHARS: usize = 400;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    binary: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter using the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Build the full argument list for one chunk
    pub fn build_args(job: &ChunkJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-loglevel".into(),
            "error".into(),
            OverwriteGuard::ffmpeg_flag(job.overwrite).into(),
            "-ss".into(),
            job.span.start.as_ffmpeg_arg().into(),
            "-t".into(),
            job.span.duration.as_ffmpeg_arg().into(),
            "-i".into(),
            job.input.as_os_str().to_os_string(),
            "-vf".into(),
            job.scale.filter().into(),
        ];
        args.extend(
            EncodingPolicy::audio_args(job.format)
                .iter()
                .map(OsString::from),
        );
        args.push(job.output.as_os_str().to_os_string());
        args
    }
}

/// Last `STDERR_TAIL_CHARS` characters of a process' stderr
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    if count <= STDERR_TAIL_CHARS {
        trimmed.to_string()
    } else {
        trimmed.chars().skip(count - STDERR_TAIL_CHARS).collect()
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn extract(&self, job: &ChunkJob) -> Result<PathBuf, DomainError> {
        let args = Self::build_args(job);
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
            return Err(DomainError::ExecFail(format!(
                "ffmpeg exited with {} for {}: {}",
                output.status,
                job.output.display(),
                stderr_tail(&output.stderr)
            )));
        }

        // Below info: the progress bar owns stderr during a run
        debug!(
            "Generated {} {}",
            job.format.extension().to_uppercase(),
            job.output.display()
        );
        Ok(job.output.clone())
    }
}
