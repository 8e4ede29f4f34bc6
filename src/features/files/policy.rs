use crate::core::config::UploadConfig;
use crate::core::error::AppError;

/// Why an upload was refused. Every variant is a client error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRejection {
    MissingFile,
    EmptyFilename,
    TooLarge,
    TypeNotAllowed,
}

impl UploadRejection {
    pub fn message(&self) -> &'static str {
        match self {
            UploadRejection::MissingFile => "File not uploaded",
            UploadRejection::EmptyFilename => "No selected file",
            UploadRejection::TooLarge => "File size exceeds the allowed limit",
            UploadRejection::TypeNotAllowed => "File type not allowed",
        }
    }
}

impl From<UploadRejection> for AppError {
    fn from(rejection: UploadRejection) -> Self {
        AppError::BadRequest(rejection.message().to_string())
    }
}

/// Acceptance rules for uploaded files
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadPolicy {
    pub fn new(max_file_size: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.max_file_size, config.allowed_extensions.clone())
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Lowercased text after the last `.`, if the name has one
    pub fn extension(filename: &str) -> Option<String> {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }

    pub fn is_extension_allowed(&self, filename: &str) -> bool {
        Self::extension(filename)
            .is_some_and(|ext| self.allowed_extensions.iter().any(|allowed| *allowed == ext))
    }

    /// Presence checks that can run before any file content is read
    pub fn check_filename(&self, filename: Option<&str>) -> Result<(), UploadRejection> {
        match filename {
            None => Err(UploadRejection::MissingFile),
            Some("") => Err(UploadRejection::EmptyFilename),
            Some(_) => Ok(()),
        }
    }

    pub fn check_size(&self, size: usize) -> Result<(), UploadRejection> {
        if size > self.max_file_size {
            Err(UploadRejection::TooLarge)
        } else {
            Ok(())
        }
    }

    /// Full decision for a received file: name, then size, then type
    pub fn validate(&self, filename: &str, size: usize) -> Result<(), UploadRejection> {
        self.check_filename(Some(filename))?;
        self.check_size(size)?;

        if !self.is_extension_allowed(filename) {
            return Err(UploadRejection::TypeNotAllowed);
        }

        Ok(())
    }
}
