//! Outgoing e-mail via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport and sends the plain-text
//! password reset message. If `SMTP_HOST` is not set, [`EmailConfig::from_env`]
//! returns `None` and no mailer is constructed.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for e-mail delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@shelter.local";

/// Configuration for SMTP delivery.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                  |
    /// |-----------------|----------|--------------------------|
    /// | `SMTP_HOST`     | yes      | --                       |
    /// | `SMTP_PORT`     | no       | `587`                    |
    /// | `SMTP_FROM`     | no       | `noreply@shelter.local`  |
    /// | `SMTP_USER`     | no       | --                       |
    /// | `SMTP_PASSWORD` | no       | --                       |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Sends account e-mails through a pooled SMTP transport.
pub struct Mailer {
    from_address: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Mailer {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            from_address: config.from_address.clone(),
            transport: builder.build(),
        })
    }

    /// Send the password reset link to `to_email`.
    pub async fn send_password_reset(
        &self,
        to_email: &str,
        username: &str,
        reset_link: &str,
        expiry_mins: i64,
    ) -> Result<(), EmailError> {
        let email = password_reset_message(
            &self.from_address,
            to_email,
            username,
            reset_link,
            expiry_mins,
        )?;
        self.transport.send(email).await?;

        tracing::info!(to = to_email, "Password reset email sent");
        Ok(())
    }
}

/// Plain-text body of the password reset message.
fn password_reset_body(username: &str, reset_link: &str, expiry_mins: i64) -> String {
    format!(
        "Hello {username},\n\n\
         A password reset was requested for your account. Open the link below \
         to choose a new password:\n\n{reset_link}\n\n\
         The link expires in {expiry_mins} minutes. If you did not request a \
         reset you can ignore this message."
    )
}

/// Assemble the password reset message.
fn password_reset_message(
    from: &str,
    to: &str,
    username: &str,
    reset_link: &str,
    expiry_mins: i64,
) -> Result<Message, EmailError> {
    Message::builder()
        .from(from.parse()?)
        .to(to.parse()?)
        .subject("Password reset")
        .header(ContentType::TEXT_PLAIN)
        .body(password_reset_body(username, reset_link, expiry_mins))
        .map_err(|e| EmailError::Build(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_body_contains_link_and_expiry() {
        let body = password_reset_body(
            "keeper",
            "http://localhost:5173/reset-password?token=abc",
            60,
        );
        assert!(body.starts_with("Hello keeper,"));
        assert!(body.contains("\nhttp://localhost:5173/reset-password?token=abc\n"));
        assert!(body.contains("60 minutes"));
    }

    #[test]
    fn reset_message_headers() {
        let message = password_reset_message(
            "noreply@shelter.local",
            "keeper@example.org",
            "keeper",
            "http://localhost:5173/reset-password?token=abc",
            60,
        )
        .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Password reset"));
        assert!(raw.contains("keeper@example.org"));
        assert!(raw.contains("Content-Type: text/plain"));
    }

    #[test]
    fn bad_recipient_is_address_error() {
        let err = password_reset_message("noreply@shelter.local", "not-an-email", "x", "y", 60)
            .unwrap_err();
        assert!(err.to_string().contains("Email address parse error"));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
