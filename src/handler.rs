//! The contact form request handler
//!
//! One invocation: preflight requests are answered with the CORS headers only,
//! anything else must carry a JSON contact form which is forwarded by email.
//! Every outcome, including failures, becomes an [`OutboundResponse`].

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    config::Config,
    email::{DeliveryReceipt, EmailSender},
    error::ContactError,
    event::InboundEvent,
    form::ContactForm,
    message::{Addressing, OutboundMessage},
    response::{Cors, OutboundResponse},
};

#[derive(Clone)]
pub struct ContactHandler {
    sender: Arc<dyn EmailSender>,
    addressing: Addressing,
    cors: Cors,
}

impl ContactHandler {
    pub fn new(sender: Arc<dyn EmailSender>, addressing: Addressing, cors: Cors) -> Self {
        Self {
            sender,
            addressing,
            cors,
        }
    }

    pub fn from_config(sender: Arc<dyn EmailSender>, config: &Config) -> Self {
        Self::new(
            sender,
            Addressing::from(&config.email),
            Cors::from(&config.cors),
        )
    }

    #[tracing::instrument(skip_all, fields(method = event.method.as_deref().unwrap_or("")))]
    pub async fn handle(&self, event: InboundEvent) -> OutboundResponse {
        debug!(event = ?event, "Received event");
        debug!(headers = ?event.headers, body = ?event.body, "Request details");

        if event.is_preflight() {
            info!("Handling OPTIONS request");
            return OutboundResponse::preflight(&self.cors);
        }

        info!("Handling contact submission");

        match self.submit(&event).await {
            Ok(receipt) => {
                info!(code = %receipt.code, detail = ?receipt.detail, "Contact email sent");
                OutboundResponse::sent(&self.cors)
            }
            Err(err) => err.into_response(&self.cors),
        }
    }

    /// Answer an invocation that never became an [`InboundEvent`]
    pub fn reject(&self, err: ContactError) -> OutboundResponse {
        err.into_response(&self.cors)
    }

    async fn submit(&self, event: &InboundEvent) -> Result<DeliveryReceipt, ContactError> {
        let payload = event.payload()?;
        let form = ContactForm::parse(&payload)?;
        debug!(form = ?form, "Parsed form data");

        let message = OutboundMessage::contact(&form, &self.addressing)?;
        debug!(
            to = ?message.to,
            from = %message.from,
            subject = %message.subject,
            "Outbound message"
        );

        self.sender
            .send(&message)
            .await
            .map_err(ContactError::Delivery)
    }
}
