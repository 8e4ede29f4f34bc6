use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{ProcessFileDto, ProcessFileResponseDto};
use crate::features::files::policy::UploadRejection;
use crate::features::files::services::{FileService, IncomingFile};
use crate::shared::types::ErrorResponse;

/// Upload a media file
///
/// Accepts multipart/form-data with a single `file` field. The file is
/// validated (name, size, extension), written to the upload directory under
/// `<unix timestamp>_<sanitized name>` and described in the response.
#[utoipa::path(
    post,
    path = "/process",
    tag = "files",
    request_body(
        content = ProcessFileDto,
        content_type = "multipart/form-data",
        description = "Multipart form with the media file in the `file` field",
    ),
    responses(
        (status = 200, description = "File stored", body = ProcessFileResponseDto),
        (status = 400, description = "Missing, empty, oversized or disallowed file", body = ErrorResponse),
        (status = 500, description = "File could not be written", body = ErrorResponse)
    )
)]
pub async fn process_file(
    State(service): State<Arc<FileService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessFileResponseDto>> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Request is not multipart: {}", e);
        AppError::from(UploadRejection::MissingFile)
    })?;

    let policy = service.policy();
    let mut incoming: Option<IncomingFile> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() != Some("file") {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        // A `file` part without a filename is a plain form value, not an upload
        let filename = field.file_name().map(|s| s.to_string());
        if let Err(rejection) = policy.check_filename(filename.as_deref()) {
            warn!("{}", rejection.message());
            return Err(rejection.into());
        }
        let filename = filename.unwrap_or_default();

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        // Stream the content and stop as soon as it passes the ceiling
        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(read_error)? {
            if policy.check_size(data.len() + chunk.len()).is_err() {
                warn!("File {} exceeds the allowed limit.", filename);
                return Err(UploadRejection::TooLarge.into());
            }
            data.extend_from_slice(&chunk);
        }

        info!(
            "Received file with name: {}, type: {}, size: {} bytes",
            filename,
            content_type,
            data.len()
        );

        incoming = Some(IncomingFile {
            filename,
            content_type,
            data,
        });
        break;
    }

    let incoming = incoming.ok_or_else(|| {
        warn!("File not uploaded");
        AppError::from(UploadRejection::MissingFile)
    })?;

    let uploaded = service.store(incoming).await?;

    Ok(Json(ProcessFileResponseDto::from(uploaded)))
}

/// Download a stored file
///
/// Serves the raw bytes of a file previously stored by `POST /process`.
#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    tag = "files",
    params(
        ("filename" = String, Path, description = "Unique filename returned by /process")
    ),
    responses(
        (status = 200, description = "Raw file content"),
        (status = 404, description = "No such file", body = ErrorResponse)
    )
)]
pub async fn download_file(
    State(service): State<Arc<FileService>>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let (data, content_type) = service.fetch(&filename).await?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], data).into_response())
}

fn read_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload body exceeds the allowed limit");
        return UploadRejection::TooLarge.into();
    }
    debug!("Failed to read multipart data: {}", err);
    AppError::BadRequest(format!("Failed to read multipart data: {}", err.body_text()))
}
