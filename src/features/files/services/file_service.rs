use tracing::{info, warn};

use crate::core::error::Result;
use crate::features::files::dtos::content_type_for;
use crate::features::files::models::UploadedFile;
use crate::features::files::naming::{sanitize_filename, timestamped_filename};
use crate::features::files::policy::UploadPolicy;
use crate::modules::storage::LocalDiskStorage;

/// File content received from a client, not yet validated
#[derive(Debug)]
pub struct IncomingFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Service for the upload pipeline: validate, name, persist
pub struct FileService {
    policy: UploadPolicy,
    storage: LocalDiskStorage,
}

impl FileService {
    pub fn new(policy: UploadPolicy, storage: LocalDiskStorage) -> Self {
        Self { policy, storage }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Validate an incoming file and write it under a unique name
    ///
    /// # Returns
    /// The stored file's metadata. Rejections are client errors; disk
    /// failures surface as internal errors.
    pub async fn store(&self, incoming: IncomingFile) -> Result<UploadedFile> {
        let size = incoming.data.len();

        if let Err(rejection) = self.policy.validate(&incoming.filename, size) {
            warn!(
                "Rejected upload '{}' ({} bytes): {}",
                incoming.filename,
                size,
                rejection.message()
            );
            return Err(rejection.into());
        }

        let sanitized_filename = sanitize_filename(&incoming.filename);
        let unique_filename = timestamped_filename(&sanitized_filename);

        let storage_path = self.storage.write(&unique_filename, &incoming.data).await?;

        let uploaded = UploadedFile {
            original_filename: incoming.filename,
            sanitized_filename,
            content_type: incoming.content_type,
            size: size as u64,
            unique_filename,
            storage_path,
        };

        info!(
            "File '{}' ({}, {} bytes) saved at: {}",
            uploaded.original_filename,
            uploaded.content_type,
            uploaded.size,
            uploaded.storage_path.display()
        );

        Ok(uploaded)
    }

    /// Read a stored file back by its unique name
    ///
    /// # Returns
    /// The content and the content type to serve it with
    pub async fn fetch(&self, filename: &str) -> Result<(Vec<u8>, &'static str)> {
        let data = self.storage.read(filename).await?;
        Ok((data, content_type_for(filename)))
    }
}
