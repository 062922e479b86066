// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),
    /// Local source file not found
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// Output directory missing or not a directory
    #[error("Invalid output directory: {0}")]
    InvalidOutputDir(String),
    /// Download tool failed or network request failed
    #[error("Failed to download video: {0}")]
    DownloadFail(String),
    /// No progressive stream in the requested container
    #[error("No matching stream: {0}")]
    NoMatchingStream(String),
    /// Duration probe failed
    #[error("Could not get video duration: {0}")]
    ProbeFail(String),
    /// Chunk extraction failed
    #[error("Clip extraction failed: {0}")]
    ExecFail(String),
    /// Nothing to generate for the given duration
    #[error("No clips to generate: {0}")]
    NoClips(String),
    /// Filesystem operation failed
    #[error("Filesystem error: {0}")]
    FsFail(String),
    /// External tool missing or not runnable
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Short machine-readable kind, used in JSON reports
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::BadArgs(_) => "bad_args",
            DomainError::FileNotFound(_) => "file_not_found",
            DomainError::InvalidOutputDir(_) => "invalid_output_dir",
            DomainError::DownloadFail(_) => "download_fail",
            DomainError::NoMatchingStream(_) => "no_matching_stream",
            DomainError::ProbeFail(_) => "probe_fail",
            DomainError::ExecFail(_) => "exec_fail",
            DomainError::NoClips(_) => "no_clips",
            DomainError::FsFail(_) => "fs_fail",
            DomainError::ResourceUnavailable(_) => "resource_unavailable",
            DomainError::InternalError(_) => "internal_error",
        }
    }
}
