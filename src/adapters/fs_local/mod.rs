// Local filesystem adapter - File system operations via tokio::fs

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsLocalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        match fs::metadata(file_path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to stat {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn directory_exists(&self, dir_path: &Path) -> Result<bool, DomainError> {
        match fs::metadata(dir_path).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to stat {}: {}",
                dir_path.display(),
                e
            ))),
        }
    }

    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError> {
        let metadata = fs::metadata(file_path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to get file size: {}", e)))?;
        Ok(metadata.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_and_directory_checks() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("video.mp4");
        std::fs::write(&file, b"12345").unwrap();

        let fs = FsLocalAdapter::new();
        assert!(fs.file_exists(&file).await.unwrap());
        assert!(!fs.file_exists(temp_dir.path()).await.unwrap());
        assert!(!fs.file_exists(&temp_dir.path().join("missing.mp4")).await.unwrap());

        assert!(fs.directory_exists(temp_dir.path()).await.unwrap());
        assert!(!fs.directory_exists(&file).await.unwrap());

        assert_eq!(fs.get_file_size(&file).await.unwrap(), 5);
        assert!(fs.get_file_size(&temp_dir.path().join("missing.mp4")).await.is_err());
    }
}
