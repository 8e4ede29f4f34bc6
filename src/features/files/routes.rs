use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::dtos::MULTIPART_OVERHEAD;
use crate::features::files::handlers::{download_file, process_file};
use crate::features::files::services::FileService;

/// Create routes for the files feature
pub fn routes(file_service: Arc<FileService>) -> Router {
    // Allow body size up to the file ceiling + buffer for multipart overhead
    let body_limit = file_service
        .policy()
        .max_file_size()
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route(
            "/process",
            post(process_file).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/uploads/{filename}", get(download_file))
        .with_state(file_service)
}
