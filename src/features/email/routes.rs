use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::email::handlers::send_email;
use crate::features::email::services::EmailService;

/// Create routes for the email feature
pub fn routes(email_service: Arc<EmailService>) -> Router {
    Router::new()
        .route("/send-email", post(send_email))
        .with_state(email_service)
}
