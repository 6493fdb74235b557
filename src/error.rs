use thiserror::Error;

use crate::response::{Cors, OutboundResponse};

pub const MISSING_BODY_MESSAGE: &str = "Missing request body";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email";

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Missing request body")]
    MissingBody,

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Invalid event: {0}")]
    InvalidEvent(serde_json::Error),

    #[error("Invalid base64 body: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Delivery error: {0}")]
    Delivery(anyhow::Error),
}

impl ContactError {
    /// Whether the caller sent something unusable, as opposed to a server side failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, ContactError::MissingBody)
    }

    /// Map the error to the response the caller sees.
    ///
    /// Parse failures share the delivery failure response; only a missing body
    /// is reported as a client error. The cause never reaches the body.
    pub fn into_response(self, cors: &Cors) -> OutboundResponse {
        match self {
            ContactError::MissingBody => {
                tracing::warn!("Rejected submission without body");
                OutboundResponse::error(400, MISSING_BODY_MESSAGE, cors)
            }
            ContactError::InvalidBody(e) => {
                tracing::error!(error = %e, "Failed to parse contact form body");
                OutboundResponse::error(500, SEND_FAILED_MESSAGE, cors)
            }
            ContactError::InvalidEvent(e) => {
                tracing::error!(error = %e, "Event does not have the platform shape");
                OutboundResponse::error(500, SEND_FAILED_MESSAGE, cors)
            }
            ContactError::InvalidEncoding(e) => {
                tracing::error!(error = %e, "Failed to decode base64 body");
                OutboundResponse::error(500, SEND_FAILED_MESSAGE, cors)
            }
            ContactError::InvalidUtf8(e) => {
                tracing::error!(error = %e, "Decoded body is not UTF-8");
                OutboundResponse::error(500, SEND_FAILED_MESSAGE, cors)
            }
            ContactError::Template(e) => {
                tracing::error!(error = %e, "Failed to render contact email");
                OutboundResponse::error(500, SEND_FAILED_MESSAGE, cors)
            }
            ContactError::Delivery(e) => {
                tracing::error!(error = ?e, "Failed to send contact email");
                OutboundResponse::error(500, SEND_FAILED_MESSAGE, cors)
            }
        }
    }
}
