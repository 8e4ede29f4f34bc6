use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::email::dtos::SendEmailRequestDto;
use crate::features::email::services::EmailService;
use crate::shared::types::{ErrorResponse, MessageResponse};

/// Send the welcome email to one recipient
#[utoipa::path(
    post,
    path = "/send-email",
    request_body = SendEmailRequestDto,
    responses(
        (status = 200, description = "Email sent", body = MessageResponse),
        (status = 400, description = "Missing or invalid email", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 500, description = "Delivery failed", body = ErrorResponse)
    ),
    tag = "email"
)]
pub async fn send_email(
    State(service): State<Arc<EmailService>>,
    AppJson(dto): AppJson<SendEmailRequestDto>,
) -> Result<Json<MessageResponse>> {
    let recipient = dto.email.unwrap_or_default();
    service.send_welcome(&recipient).await?;

    Ok(Json(MessageResponse::new("Email sent successfully")))
}
