use std::path::PathBuf;

/// A file accepted and written to the upload directory during one request.
/// Nothing about it is persisted besides the file itself.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_filename: String,
    pub sanitized_filename: String,
    pub content_type: String,
    pub size: u64,
    pub unique_filename: String,
    pub storage_path: PathBuf,
}
