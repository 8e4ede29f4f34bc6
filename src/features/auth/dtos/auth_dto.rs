use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for account signup
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequestDto {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    #[schema(example = "jane_doe")]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    pub message: String,
    /// Opaque session token, sent back as `Authorization: Bearer <token>`
    pub token: String,
    pub user: AuthUserDto,
}

/// User info included in the login response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub username: String,
    pub email: String,
}

/// Lowercased, trimmed form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_validation() {
        let valid = SignupRequestDto {
            username: "jane_doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "correct horse".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_password = SignupRequestDto {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());

        let bad_email = SignupRequestDto {
            username: "jane_doe".to_string(),
            email: "not-an-email".to_string(),
            password: "correct horse".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane@Example.COM "), "jane@example.com");
    }
}
