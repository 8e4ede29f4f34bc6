//! Email template management.
//!
//! # Usage
//!
//! ```ignore
//! let rendered = render_welcome_email("MediaDrop", "jane@example.com")?;
//! ```

pub mod engine;

pub use engine::{render_template, TemplateError};

use chrono::Utc;
use minijinja::Value;
use std::collections::HashMap;

/// Subject and plain-text body of a rendered email
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Render the welcome email sent by `/send-email`.
pub fn render_welcome_email(app_name: &str, recipient: &str) -> Result<RenderedEmail, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("app_name", Value::from(app_name));
    ctx.insert("recipient", Value::from(recipient));
    ctx.insert(
        "sent_at",
        Value::from(Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()),
    );

    Ok(RenderedEmail {
        subject: render_template("email/welcome_subject.jinja", &ctx)?
            .trim()
            .to_string(),
        body: render_template("email/welcome_body.jinja", &ctx)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_welcome_email() {
        let email = render_welcome_email("MediaDrop", "jane@example.com").expect("render");

        assert_eq!(email.subject, "Hello from MediaDrop");
        assert!(email.body.contains("Hello jane@example.com,"));
        assert!(email.body.contains("The MediaDrop team"));
    }
}
