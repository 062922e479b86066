// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::errors::DomainError;

/// Default chunk length in seconds
pub const DEFAULT_CHUNK_DURATION: u32 = 10;
/// Longest accepted chunk length in seconds, one day
pub const MAX_CHUNK_DURATION: u32 = 86_400;
/// Default scale expression (480 px wide, aspect preserved)
pub const DEFAULT_SCALE: &str = "480:-1";
/// Shortest trailing segment worth emitting as its own clip
pub const MIN_TAIL_SECONDS: f64 = 0.1;

/// Time specification - represents an offset in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Format as H:MM:SS.mmm (hours omitted when zero)
    pub fn format_hms(&self) -> String {
        let total_millis = (self.seconds * 1000.0).round() as u64;
        let hours = total_millis / 3_600_000;
        let minutes = (total_millis % 3_600_000) / 60_000;
        let seconds = (total_millis % 60_000) / 1000;
        let milliseconds = total_millis % 1000;

        if hours > 0 {
            format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }

    /// Format for an ffmpeg `-ss`/`-t` argument: whole seconds stay integral
    pub fn as_ffmpeg_arg(&self) -> String {
        if self.seconds.fract() == 0.0 {
            format!("{}", self.seconds as u64)
        } else {
            format!("{:.3}", self.seconds)
        }
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// Output clip format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Animated GIF, no audio
    #[default]
    Gif,
    /// MP4 with the source audio copied
    Mp4,
}

impl OutputFormat {
    /// Parse format from string (case insensitive)
    pub fn parse(format_str: &str) -> Result<Self, DomainError> {
        match format_str.trim().to_lowercase().as_str() {
            "gif" => Ok(OutputFormat::Gif),
            "mp4" => Ok(OutputFormat::Mp4),
            other => Err(DomainError::BadArgs(format!(
                "Invalid output format: {}. Valid formats: gif, mp4",
                other
            ))),
        }
    }

    /// File extension for clips of this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Gif => "gif",
            OutputFormat::Mp4 => "mp4",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Scale expression passed to ffmpeg's scale filter, `width:height`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleSpec {
    pub width: String,
    pub height: String,
}

impl ScaleSpec {
    /// Parse `W:H`. Components are handed to ffmpeg untouched, so `0`
    /// (input size), `-n` (keep aspect ratio) and expressions all pass.
    pub fn parse(scale_str: &str) -> Result<Self, DomainError> {
        let trimmed = scale_str.trim();
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() != 2 {
            return Err(DomainError::BadArgs(format!(
                "Invalid scale '{}'. Expected WIDTH:HEIGHT (e.g., 480:-1)",
                scale_str
            )));
        }

        let width = Self::parse_component(parts[0], "width")?;
        let height = Self::parse_component(parts[1], "height")?;

        Ok(Self { width, height })
    }

    fn parse_component(component: &str, axis: &str) -> Result<String, DomainError> {
        let component = component.trim();
        if component.is_empty() {
            return Err(DomainError::BadArgs(format!("Scale {} is empty", axis)));
        }

        Ok(component.to_string())
    }

    /// Video filter argument, e.g. `scale=480:-1`
    pub fn filter(&self) -> String {
        format!("scale={}:{}", self.width, self.height)
    }
}

impl Default for ScaleSpec {
    fn default() -> Self {
        Self {
            width: "480".to_string(),
            height: "-1".to_string(),
        }
    }
}

impl fmt::Display for ScaleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Where the source video comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Remote video, downloaded into the output directory first
    Url(String),
    /// Video already on disk
    Local(PathBuf),
}

impl VideoSource {
    /// Build a source from optional user inputs. Blank values count as absent
    /// and a URL wins over a local path.
    pub fn from_inputs(url: Option<&str>, path: Option<&Path>) -> Result<Self, DomainError> {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            return Ok(VideoSource::Url(url.to_string()));
        }

        match path.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Ok(VideoSource::Local(path.to_path_buf())),
            None => Err(DomainError::BadArgs(
                "Please provide a video URL or a local video file".to_string(),
            )),
        }
    }
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoSource::Url(url) => write!(f, "{}", url),
            VideoSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What to do with a trailing segment shorter than the chunk length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TailPolicy {
    #[default]
    Drop,
    Emit,
}

/// What to do when extracting a single chunk fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    #[default]
    Abort,
    KeepGoing,
}

/// Behaviour when a clip file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverwritePolicy {
    Always,
    #[default]
    Never,
}

impl OverwritePolicy {
    /// Parse overwrite policy from string
    pub fn parse(policy_str: &str) -> Result<Self, DomainError> {
        match policy_str.trim().to_lowercase().as_str() {
            "always" | "yes" => Ok(OverwritePolicy::Always),
            "never" | "no" => Ok(OverwritePolicy::Never),
            other => Err(DomainError::BadArgs(format!(
                "Invalid overwrite policy: {}. Valid policies: always, never",
                other
            ))),
        }
    }
}

/// One segment of the source video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkSpan {
    pub index: u32,
    pub start: TimeSpec,
    pub duration: TimeSpec,
}

impl ChunkSpan {
    pub fn end(&self) -> TimeSpec {
        TimeSpec::from_seconds(self.start.seconds + self.duration.seconds)
    }
}

/// Ordered list of segments covering the source
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkPlan {
    pub total_duration: TimeSpec,
    pub chunk_duration: u32,
    pub spans: Vec<ChunkSpan>,
}

impl ChunkPlan {
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// File name of the clip at `index`, e.g. `chunk_007.gif`
pub fn chunk_file_name(index: u32, format: OutputFormat) -> String {
    format!("chunk_{:03}.{}", index, format.extension())
}

/// Chunk length must lie in `1..=MAX_CHUNK_DURATION`
pub fn validate_chunk_duration(chunk_duration: u32) -> Result<(), DomainError> {
    if chunk_duration == 0 {
        return Err(DomainError::BadArgs(
            "Chunk duration must be at least 1 second".to_string(),
        ));
    }
    if chunk_duration > MAX_CHUNK_DURATION {
        return Err(DomainError::BadArgs(format!(
            "Chunk duration must be at most {} seconds, got {}",
            MAX_CHUNK_DURATION, chunk_duration
        )));
    }
    Ok(())
}

/// Immutable description of one split run
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRequest {
    pub source: VideoSource,
    pub output_dir: PathBuf,
    pub chunk_duration: u32,
    pub scale: ScaleSpec,
    pub format: OutputFormat,
    pub tail_policy: TailPolicy,
    pub failure_policy: FailurePolicy,
    pub overwrite: OverwritePolicy,
}

impl SplitRequest {
    /// Create new split request with validation
    pub fn new(
        source: VideoSource,
        output_dir: PathBuf,
        chunk_duration: u32,
        scale: ScaleSpec,
        format: OutputFormat,
    ) -> Result<Self, DomainError> {
        validate_chunk_duration(chunk_duration)?;
        if output_dir.as_os_str().is_empty() {
            return Err(DomainError::InvalidOutputDir(
                "Output directory cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            source,
            output_dir,
            chunk_duration,
            scale,
            format,
            tail_policy: TailPolicy::default(),
            failure_policy: FailurePolicy::default(),
            overwrite: OverwritePolicy::default(),
        })
    }

    pub fn with_tail_policy(mut self, tail_policy: TailPolicy) -> Self {
        self.tail_policy = tail_policy;
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn with_overwrite(mut self, overwrite: OverwritePolicy) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Output path for the clip at `index`
    pub fn clip_path(&self, index: u32) -> PathBuf {
        self.output_dir.join(chunk_file_name(index, self.format))
    }
}

/// Everything the extraction port needs for one chunk
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub span: ChunkSpan,
    pub scale: ScaleSpec,
    pub format: OutputFormat,
    pub overwrite: OverwritePolicy,
}

/// A clip written to disk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipRecord {
    pub index: u32,
    pub path: PathBuf,
    pub start: TimeSpec,
    pub duration: TimeSpec,
    pub file_size: Option<u64>,
}

/// A chunk whose extraction failed under the keep-going policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkFailure {
    pub index: u32,
    pub path: PathBuf,
    pub kind: String,
    pub message: String,
}

/// Summary of a finished split run
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub total_duration: TimeSpec,
    pub chunk_duration: u32,
    pub clips: Vec<ClipRecord>,
    pub failures: Vec<ChunkFailure>,
    pub elapsed_secs: f64,
    pub generated_at: DateTime<Utc>,
}

impl SplitReport {
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
