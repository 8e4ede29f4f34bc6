use axum::{http::StatusCode, Json};

use crate::shared::constants::{HELLO_MESSAGE, WELCOME_TEXT};
use crate::shared::types::MessageResponse;

/// Plain-text welcome
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome text", body = String, content_type = "text/plain")),
    tag = "home"
)]
pub async fn index() -> &'static str {
    WELCOME_TEXT
}

/// Greeting
#[utoipa::path(
    get,
    path = "/hello",
    responses((status = 200, description = "Greeting", body = MessageResponse)),
    tag = "home"
)]
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new(HELLO_MESSAGE))
}

/// Liveness probe
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
