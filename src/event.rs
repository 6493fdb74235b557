//! Inbound events and the adapter that normalises platform event shapes
//!
//! The invoking platform delivers the HTTP method either as a flat
//! `httpMethod` field or nested under `requestContext.http.method`. Both are
//! folded into [`InboundEvent::method`] at deserialisation so the handler only
//! ever sees one field.

use std::collections::BTreeMap;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;

use crate::error::ContactError;

pub const PREFLIGHT_METHOD: &str = "OPTIONS";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlatformEvent {
    #[serde(default)]
    http_method: Option<String>,
    #[serde(default)]
    request_context: Option<RequestContext>,
    #[serde(default)]
    headers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    is_base64_encoded: bool,
}

#[derive(Debug, Deserialize)]
struct RequestContext {
    #[serde(default)]
    http: Option<HttpContext>,
}

#[derive(Debug, Deserialize)]
struct HttpContext {
    #[serde(default)]
    method: Option<String>,
}

/// A single HTTP-shaped request handed to the handler
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "PlatformEvent")]
pub struct InboundEvent {
    pub method: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

impl From<PlatformEvent> for InboundEvent {
    fn from(raw: PlatformEvent) -> Self {
        let nested = raw
            .request_context
            .and_then(|ctx| ctx.http)
            .and_then(|http| http.method);

        // An empty flat field falls through to the nested one
        let method = raw
            .http_method
            .filter(|method| !method.is_empty())
            .or(nested)
            .filter(|method| !method.is_empty());

        Self {
            method,
            headers: raw.headers.unwrap_or_default(),
            body: raw.body,
            is_base64_encoded: raw.is_base64_encoded,
        }
    }
}

impl InboundEvent {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_base64_encoded = false;
        self
    }

    pub fn with_base64_body(mut self, body: impl AsRef<[u8]>) -> Self {
        self.body = Some(STANDARD.encode(body));
        self.is_base64_encoded = true;
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_preflight(&self) -> bool {
        self.method.as_deref() == Some(PREFLIGHT_METHOD)
    }

    /// Request payload as text, decoding base64 when the platform flagged it.
    ///
    /// An absent or empty body is reported as [`ContactError::MissingBody`].
    pub fn payload(&self) -> Result<String, ContactError> {
        let body = match self.body.as_deref() {
            Some(body) if !body.is_empty() => body,
            _ => return Err(ContactError::MissingBody),
        };

        if !self.is_base64_encoded {
            return Ok(body.to_owned());
        }

        let bytes = STANDARD.decode(body)?;
        Ok(String::from_utf8(bytes)?)
    }
}
