//! One-shot invocation: read a platform event, print the platform response

use std::io::{Read, Write};

use anyhow::Context;

use crate::{
    error::ContactError, event::InboundEvent, handler::ContactHandler, response::OutboundResponse,
};

/// Run the handler once on the JSON event read from `input`, writing the
/// response as JSON to `output`.
///
/// Input that is not JSON fails the command. JSON that is not a platform event
/// is answered like any other failed invocation.
pub async fn run(
    handler: &ContactHandler,
    mut input: impl Read,
    mut output: impl Write,
) -> anyhow::Result<OutboundResponse> {
    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .context("Failed to read event")?;

    let value: serde_json::Value =
        serde_json::from_str(&raw).context("Event is not valid JSON")?;
    let response = match serde_json::from_value::<InboundEvent>(value) {
        Ok(event) => handler.handle(event).await,
        Err(err) => handler.reject(ContactError::InvalidEvent(err)),
    };

    serde_json::to_writer_pretty(&mut output, &response).context("Failed to write response")?;
    writeln!(output)?;

    Ok(response)
}
