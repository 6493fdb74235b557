//! Adapter between axum requests and the platform-neutral contact handler

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
};

use crate::{event::InboundEvent, handler::ContactHandler, response::OutboundResponse};

pub async fn invoke(
    State(handler): State<ContactHandler>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> OutboundResponse {
    handler.handle(to_event(&method, &headers, body)).await
}

/// Build the event the platform would have delivered for this request.
///
/// Bodies that are not UTF-8 are passed on base64 encoded, an empty body is
/// absent.
pub(crate) fn to_event(method: &Method, headers: &HeaderMap, body: Bytes) -> InboundEvent {
    let mut event = InboundEvent::new(method.as_str());

    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            tracing::debug!(header = %name, "Skipping non-ASCII header value");
            continue;
        };

        let merged = match event.headers.get(name.as_str()) {
            Some(existing) => format!("{existing}, {value}"),
            None => value.to_owned(),
        };
        event = event.with_header(name.as_str(), merged);
    }

    if body.is_empty() {
        return event;
    }

    match String::from_utf8(body.to_vec()) {
        Ok(text) => event.with_body(text),
        Err(_) => event.with_base64_body(&body),
    }
}
