use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::files::models::UploadedFile;
use crate::shared::constants::PLACEHOLDER_EXTRACTED_TEXT;

/// Upload request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProcessFileDto {
    /// The media file to upload (png, jpg, jpeg, gif or mp4)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Response DTO for `POST /process`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessFileResponseDto {
    /// Where the file was written, `<upload dir>/<unique_filename>`
    #[schema(example = "uploads/1718000000_cat.png")]
    pub file_path: String,
    /// Sanitized form of the uploaded filename
    #[schema(example = "cat.png")]
    pub filename: String,
    /// Stored name, also the key for `GET /uploads/{filename}`
    #[schema(example = "1718000000_cat.png")]
    pub unique_filename: String,
    /// Placeholder until text extraction exists; carries no file content
    #[schema(example = "TS241464")]
    pub extracted_text: String,
}

impl From<UploadedFile> for ProcessFileResponseDto {
    fn from(file: UploadedFile) -> Self {
        Self {
            file_path: file.storage_path.display().to_string(),
            filename: file.sanitized_filename,
            unique_filename: file.unique_filename,
            extracted_text: PLACEHOLDER_EXTRACTED_TEXT.to_string(),
        }
    }
}

/// Extra room on top of the file ceiling for multipart framing
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Content type served for a stored file, from its extension
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("1_a.PNG"), "image/png");
        assert_eq!(content_type_for("1_a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("1_a.mp4"), "video/mp4");
        assert_eq!(content_type_for("1_a"), "application/octet-stream");
    }

    #[test]
    fn test_response_from_uploaded_file() {
        let file = UploadedFile {
            original_filename: "my cat.png".to_string(),
            sanitized_filename: "my_cat.png".to_string(),
            content_type: "image/png".to_string(),
            size: 3,
            unique_filename: "1700000000_my_cat.png".to_string(),
            storage_path: PathBuf::from("uploads").join("1700000000_my_cat.png"),
        };

        let dto = ProcessFileResponseDto::from(file);
        assert_eq!(dto.filename, "my_cat.png");
        assert_eq!(dto.unique_filename, "1700000000_my_cat.png");
        assert_eq!(dto.file_path, "uploads/1700000000_my_cat.png");
        assert_eq!(dto.extracted_text, PLACEHOLDER_EXTRACTED_TEXT);
    }
}
