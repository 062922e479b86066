// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media duration probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Duration of the media file in seconds
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError>;
}

/// Port for extracting a single time-bounded segment
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Extract `job.span` from `job.input` into `job.output`, returning the
    /// path that was written
    async fn extract(&self, job: &ChunkJob) -> Result<PathBuf, DomainError>;
}

/// Port for resolving a remote video into a local file
#[async_trait]
pub trait FetchPort: Send + Sync {
    /// Download the best progressive stream of `url` into `output_dir`
    async fn download(&self, url: &str, output_dir: &Path) -> Result<PathBuf, DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if a regular file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Check if directory exists
    async fn directory_exists(&self, dir_path: &Path) -> Result<bool, DomainError>;

    /// Get file size
    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError>;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Get configuration value
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Get configuration value with default
    async fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, DomainError>;

    /// Set configuration value
    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Load configuration from file
    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Validate configuration
    async fn validate_config(&self) -> Result<(), DomainError>;

    /// Path of the loaded configuration file, if any
    async fn get_config_file_path(&self) -> Result<Option<PathBuf>, DomainError>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);
}

/// Progress sink advanced once per finished clip
pub trait ProgressPort: Send + Sync {
    /// Called before the first clip with the total number of clips
    fn begin(&self, total: u64);

    /// Called after each clip, successful or not
    fn advance(&self, message: &str);

    /// Called when every clip has been processed
    fn finish(&self, message: &str);

    /// Called when the run stops early
    fn abandon(&self, message: &str);
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
