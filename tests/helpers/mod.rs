//! Shared fixtures for handler and route tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use treid_contact::{
    Addressing, ContactHandler, Cors, DeliveryReceipt, EmailSender, OutboundMessage,
    OutboundResponse,
};

pub const ANA_FORM: &str = r#"{"nome":"Ana","email":"ana@x.com","celular":"11999999999","empresa":"Acme","mensagem":"Oi"}"#;

/// Sender that records every message and accepts it
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<OutboundMessage>>,
}

impl RecordingSender {
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().expect("recorder lock").clone()
    }
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<DeliveryReceipt> {
        self.sent.lock().expect("recorder lock").push(message.clone());

        Ok(DeliveryReceipt {
            code: "250".to_string(),
            detail: Some("Ok".to_string()),
        })
    }
}

/// Sender that records every attempt and rejects it
#[derive(Default)]
pub struct FailingSender {
    attempts: Mutex<usize>,
}

impl FailingSender {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().expect("attempts lock")
    }
}

#[async_trait]
impl EmailSender for FailingSender {
    async fn send(&self, _message: &OutboundMessage) -> anyhow::Result<DeliveryReceipt> {
        *self.attempts.lock().expect("attempts lock") += 1;

        Err(anyhow::anyhow!("554 Message rejected: Email address is not verified"))
    }
}

pub fn handler_with(sender: Arc<dyn EmailSender>) -> ContactHandler {
    ContactHandler::new(sender, Addressing::default(), Cors::default())
}

pub fn assert_cors(response: &OutboundResponse) {
    assert_eq!(
        response.header("Access-Control-Allow-Origin"),
        Some("https://treid.com.br")
    );
    assert_eq!(
        response.header("Access-Control-Allow-Headers"),
        Some("Content-Type, Origin")
    );
    assert_eq!(
        response.header("Access-Control-Allow-Methods"),
        Some("POST, OPTIONS")
    );
}
