use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto, SignupRequestDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::{ErrorResponse, MessageResponse};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

/// Create an account
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Username or email already registered", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignupRequestDto>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.signup(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<LoginResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(response))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "No active session", body = ErrorResponse),
        (status = 500, description = "Session could not be removed", body = ErrorResponse)
    ),
    tag = "auth",
    security(
        ("session_token" = [])
    )
)]
pub async fn logout(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<MessageResponse>> {
    service.logout(&user).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}
