// Fetch interactor - Turns a video source into a readable local file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Interactor for the acquisition use case
pub struct FetchInteractor {
    fetch_port: Arc<dyn FetchPort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl FetchInteractor {
    /// Create new fetch interactor with injected ports
    pub fn new(
        fetch_port: Arc<dyn FetchPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            fetch_port,
            fs_port,
            log_port,
        }
    }

    /// Resolve `source` to a local file. Remote sources are downloaded into
    /// `download_dir`; local sources must already exist.
    pub async fn resolve(
        &self,
        source: &VideoSource,
        download_dir: &Path,
    ) -> Result<PathBuf, DomainError> {
        match source {
            VideoSource::Url(url) => {
                if !self.fs_port.directory_exists(download_dir).await? {
                    return Err(DomainError::InvalidOutputDir(format!(
                        "{} does not exist or is not a directory",
                        download_dir.display()
                    )));
                }

                self.log_port
                    .info(&format!("Downloading video from {}", url))
                    .await;
                let path = self.fetch_port.download(url, download_dir).await?;

                if !self.fs_port.file_exists(&path).await? {
                    return Err(DomainError::DownloadFail(format!(
                        "downloaded file is missing: {}",
                        path.display()
                    )));
                }

                self.log_port
                    .info(&format!("Downloaded video to {}", path.display()))
                    .await;
                Ok(path)
            }
            VideoSource::Local(path) => {
                if !self.fs_port.file_exists(path).await? {
                    return Err(DomainError::FileNotFound(format!(
                        "{} does not exist or is not a file",
                        path.display()
                    )));
                }

                self.log_port
                    .debug(&format!("Using local video {}", path.display()))
                    .await;
                Ok(path.clone())
            }
        }
    }
}
