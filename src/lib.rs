//! ClipGen Library
//!
//! Downloads a video or opens a local file, measures its duration with
//! ffprobe and cuts it into fixed-length GIF or MP4 clips with ffmpeg.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{OutputFormat, ScaleSpec, SplitReport, SplitRequest, VideoSource};
