//! Local filesystem storage for uploaded media
//!
//! Files live flat under a single root directory and are addressed by their
//! unique filename. Names that are not a single plain path component are
//! refused so nothing can be read or written outside the root.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::core::error::AppError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage name: {0}")]
    InvalidName(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidName(_) | StorageError::NotFound(_) => {
                AppError::NotFound("File not found".to_string())
            }
            io @ StorageError::Io { .. } => AppError::Internal(io.to_string()),
        }
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone)]
pub struct LocalDiskStorage {
    root: PathBuf,
}

impl LocalDiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path a stored name resolves to, after validating the name
    pub fn path_for(&self, name: &str) -> StorageResult<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == name => Ok(self.root.join(name)),
            _ => Err(StorageError::InvalidName(name.to_string())),
        }
    }

    /// Create the root directory (and parents) if it does not exist yet
    pub async fn ensure_root(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::Io {
                path: self.root.clone(),
                source,
            })
    }

    /// Write the full content under `name`, replacing any existing file
    pub async fn write(&self, name: &str, data: &[u8]) -> StorageResult<PathBuf> {
        let path = self.path_for(name)?;
        self.ensure_root().await?;

        fs::write(&path, data)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;

        debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(path)
    }

    pub async fn read(&self, name: &str) -> StorageResult<Vec<u8>> {
        let path = self.path_for(name)?;

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}
