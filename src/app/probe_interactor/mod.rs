// Probe interactor - Reports the duration of a media file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::ChunkPlanner;
use crate::ports::*;

/// Interactor for the duration probe use case
pub struct ProbeInteractor {
    probe_port: Arc<dyn ProbePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl ProbeInteractor {
    /// Create new probe interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            probe_port,
            fs_port,
            log_port,
        }
    }

    /// Probe `input`, optionally previewing how many clips `chunk_duration`
    /// would produce
    pub async fn execute(
        &self,
        input: &Path,
        chunk_duration: Option<u32>,
    ) -> Result<ProbeResponse, DomainError> {
        if !self.fs_port.file_exists(input).await? {
            return Err(DomainError::FileNotFound(format!(
                "{} does not exist or is not a file",
                input.display()
            )));
        }

        let seconds = self.probe_port.probe_duration(input).await?;
        let duration = TimeSpec::from_seconds(seconds);
        self.log_port
            .info(&format!("{}: duration {}", input.display(), duration))
            .await;

        let file_size = self.fs_port.get_file_size(input).await.ok();

        Ok(ProbeResponse {
            path: input.to_path_buf(),
            duration,
            file_size,
            chunk_duration,
            full_chunks: chunk_duration.map(|c| ChunkPlanner::full_chunk_count(seconds, c)),
        })
    }
}

/// Result of a duration probe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResponse {
    pub path: PathBuf,
    pub duration: TimeSpec,
    pub file_size: Option<u64>,
    pub chunk_duration: Option<u32>,
    pub full_chunks: Option<u32>,
}
