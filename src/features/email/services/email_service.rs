use std::sync::Arc;
use tracing::info;
use validator::ValidateEmail;

use crate::core::error::{AppError, Result};
use crate::modules::mail::{Mailer, OutgoingEmail};
use crate::shared::templates::render_welcome_email;

/// Notifier: renders a template and hands one message to the mailer.
/// Failures are returned to the caller; nothing is retried or queued.
pub struct EmailService {
    mailer: Arc<dyn Mailer>,
    app_name: String,
}

impl EmailService {
    pub fn new(mailer: Arc<dyn Mailer>, app_name: impl Into<String>) -> Self {
        Self {
            mailer,
            app_name: app_name.into(),
        }
    }

    pub async fn send_welcome(&self, recipient: &str) -> Result<()> {
        let recipient = recipient.trim();

        if recipient.is_empty() {
            return Err(AppError::BadRequest("Email is required".to_string()));
        }
        if !recipient.validate_email() {
            return Err(AppError::BadRequest("Invalid email format".to_string()));
        }

        let rendered = render_welcome_email(&self.app_name, recipient)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        self.mailer
            .send(&OutgoingEmail {
                to: recipient.to_string(),
                subject: rendered.subject,
                body: rendered.body,
            })
            .await?;

        info!("Welcome email delivered to {}", recipient);
        Ok(())
    }
}
