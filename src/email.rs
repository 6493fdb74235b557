//! Email delivery using lettre

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::MultiPart,
    transport::smtp::authentication::Credentials,
};
use tracing::info;

use crate::{config::EmailConfig, message::OutboundMessage};

/// Provider acknowledgement of an accepted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub code: String,
    pub detail: Option<String>,
}

/// Capability to deliver an [`OutboundMessage`].
///
/// Implementations are built once per process and shared read-only between
/// invocations.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<DeliveryReceipt>;
}

/// Email service for sending contact notifications
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    skip_sending: bool,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let host = config.smtp_endpoint();

        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            info!(
                smtp_host = %host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host)
                .port(config.smtp_port)
                .build()
        } else {
            info!(
                smtp_host = %host,
                smtp_port = config.smtp_port,
                from = %config.from_address,
                "Email service initialized with authentication and TLS"
            );
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            skip_sending: false,
        })
    }

    /// Create an email service that builds messages but skips SMTP
    pub fn new_mock(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous("localhost")
            .port(1025)
            .build();

        info!(
            from = %config.from_address,
            to = %config.contact_address,
            "Mock email service initialized (SMTP calls skipped)"
        );

        Ok(Self {
            mailer,
            skip_sending: true,
        })
    }

    pub fn from_config(config: &EmailConfig) -> anyhow::Result<Self> {
        if config.dry_run {
            Self::new_mock(config)
        } else {
            Self::new(config)
        }
    }
}

/// Convert an [`OutboundMessage`] into a multipart lettre message
pub fn build_message(message: &OutboundMessage) -> anyhow::Result<Message> {
    let mut builder = Message::builder()
        .from(message.from.parse()?)
        .subject(message.subject.to_owned());

    for to in &message.to {
        builder = builder.to(to.parse()?);
    }

    Ok(builder.multipart(MultiPart::alternative_plain_html(
        message.text_body.to_owned(),
        message.html_body.to_owned(),
    ))?)
}

#[async_trait]
impl EmailSender for EmailService {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<DeliveryReceipt> {
        let email = build_message(message)?;

        info!(
            to = ?message.to,
            subject = %message.subject,
            "Sending email"
        );

        if self.skip_sending {
            info!("Mock email service: Skipping actual SMTP send (test mode)");
            return Ok(DeliveryReceipt {
                code: "250".to_string(),
                detail: Some("skipped".to_string()),
            });
        }

        let response = self.mailer.send(email).await?;

        Ok(DeliveryReceipt {
            code: response.code().to_string(),
            detail: response.first_line().map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{form::ContactForm, message::Addressing};

    fn contact_message() -> anyhow::Result<OutboundMessage> {
        let form = ContactForm {
            name: Some("Ana".to_string()),
            message: Some("Oi".to_string()),
            ..Default::default()
        };

        Ok(OutboundMessage::contact(&form, &Addressing::default())?)
    }

    #[test]
    fn test_build_message_headers() -> anyhow::Result<()> {
        let email = build_message(&contact_message()?)?;
        let formatted = String::from_utf8(email.formatted())?;

        assert!(formatted.contains("From: contato@treid.com.br"));
        assert!(formatted.contains("To: contato@treid.com.br"));
        assert!(formatted.contains("multipart/alternative"));

        Ok(())
    }

    #[test]
    fn test_build_message_rejects_bad_address() -> anyhow::Result<()> {
        let mut message = contact_message()?;
        message.from = "not an address".to_string();

        assert!(build_message(&message).is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_service_skips_smtp() -> anyhow::Result<()> {
        let service = EmailService::new_mock(&EmailConfig::default())?;
        let receipt = service.send(&contact_message()?).await?;

        assert_eq!(receipt.code, "250");

        Ok(())
    }

    #[tokio::test]
    async fn test_dry_run_config_selects_mock() -> anyhow::Result<()> {
        let config = EmailConfig {
            dry_run: true,
            ..Default::default()
        };
        let service = EmailService::from_config(&config)?;

        assert!(service.skip_sending);

        Ok(())
    }
}
