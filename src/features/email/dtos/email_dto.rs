use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request DTO for `POST /send-email`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendEmailRequestDto {
    /// Recipient address
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
}
