use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use super::{MailError, Mailer, OutgoingEmail};
use crate::core::config::MailConfig;

/// SMTP transport backed by lettre
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let host = config.host.as_deref().ok_or(MailError::NotConfigured)?;

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|_| MailError::InvalidAddress(config.from.clone()))?;

        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| MailError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };

        let builder = builder.port(config.port);
        let builder = match config.credentials() {
            Some((user, pass)) => builder.credentials(Credentials::new(user, pass)),
            None => builder,
        };

        info!(
            host = %host,
            port = config.port,
            starttls = config.starttls,
            "SMTP mailer initialized"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(email.to.clone()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        info!(to = %email.to, "Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MailConfig {
        MailConfig {
            host: Some("localhost".to_string()),
            port: 2525,
            username: None,
            password: None,
            from: "MediaDrop <no-reply@example.com>".to_string(),
            starttls: false,
        }
    }

    #[test]
    fn test_from_config_builds_plain_transport() {
        assert!(SmtpMailer::from_config(&config()).is_ok());
    }

    #[test]
    fn test_from_config_rejects_bad_sender() {
        let mut config = config();
        config.from = "not an address".to_string();
        assert!(matches!(
            SmtpMailer::from_config(&config),
            Err(MailError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_from_config_requires_host() {
        let mut config = config();
        config.host = None;
        assert!(matches!(
            SmtpMailer::from_config(&config),
            Err(MailError::NotConfigured)
        ));
    }
}
