//! Outbound email transports
//!
//! `Mailer` is the seam the email feature talks to. The SMTP transport is
//! used when a host is configured; otherwise every send fails with
//! `MailError::NotConfigured`.

mod smtp;

pub use smtp::SmtpMailer;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::core::config::MailConfig;
use crate::core::error::AppError;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Email delivery is not configured")]
    NotConfigured,

    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A single plain-text message to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

/// Pick the transport for the given configuration
pub fn from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config.host {
        Some(_) => Ok(Arc::new(SmtpMailer::from_config(config)?)),
        None => {
            tracing::warn!("SMTP_HOST not set, email delivery disabled");
            Ok(Arc::new(DisabledMailer))
        }
    }
}
