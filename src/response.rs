//! HTTP-shaped responses returned to the invoking platform

use std::collections::BTreeMap;

use axum::{
    http::{HeaderName, HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::config::CorsConfig;

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";

pub const SENT_MESSAGE: &str = "Email sent successfully";

/// The fixed CORS header set attached to every response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cors {
    pub allow_origin: String,
    pub allow_headers: String,
    pub allow_methods: String,
}

impl Default for Cors {
    fn default() -> Self {
        Self::from(&CorsConfig::default())
    }
}

impl From<&CorsConfig> for Cors {
    fn from(config: &CorsConfig) -> Self {
        Self {
            allow_origin: config.allow_origin.to_owned(),
            allow_headers: config.allow_headers.to_owned(),
            allow_methods: config.allow_methods.to_owned(),
        }
    }
}

impl Cors {
    pub fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (ALLOW_ORIGIN.to_owned(), self.allow_origin.to_owned()),
            (ALLOW_HEADERS.to_owned(), self.allow_headers.to_owned()),
            (ALLOW_METHODS.to_owned(), self.allow_methods.to_owned()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl OutboundResponse {
    /// Answer to a CORS preflight: headers only, empty body
    pub fn preflight(cors: &Cors) -> Self {
        Self {
            status_code: 200,
            headers: cors.headers(),
            body: String::new(),
        }
    }

    pub fn sent(cors: &Cors) -> Self {
        Self::json(200, json!({ "message": SENT_MESSAGE }), cors)
    }

    pub fn error(status_code: u16, message: &str, cors: &Cors) -> Self {
        Self::json(status_code, json!({ "error": message }), cors)
    }

    fn json(status_code: u16, body: serde_json::Value, cors: &Cors) -> Self {
        let mut headers = cors.headers();
        headers.insert("Content-Type".to_owned(), "application/json".to_owned());

        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl IntoResponse for OutboundResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, self.body).into_response();
        response.headers_mut().remove(CONTENT_TYPE);

        for (name, value) in &self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }

        response
    }
}
