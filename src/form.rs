use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use crate::error::ContactError;

/// Fields posted by the site's contact form.
///
/// Nothing is required and nothing is format checked, the form is forwarded as
/// the visitor typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    #[serde(rename = "nome", default, deserialize_with = "field")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "field")]
    pub email: Option<String>,
    #[serde(rename = "celular", default, deserialize_with = "field")]
    pub phone: Option<String>,
    #[serde(rename = "empresa", default, deserialize_with = "field")]
    pub company: Option<String>,
    #[serde(rename = "mensagem", default, deserialize_with = "field")]
    pub message: Option<String>,
}

impl ContactForm {
    /// Parse a JSON request body.
    ///
    /// `null` is rejected. Any other JSON value that isn't an object (arrays,
    /// strings, numbers, booleans) has none of the form's fields and yields an
    /// empty form.
    pub fn parse(body: &str) -> Result<Self, ContactError> {
        match serde_json::from_str::<Value>(body)? {
            Value::Null => Err(ContactError::InvalidBody(de::Error::custom(
                "expected a JSON value other than null",
            ))),
            value @ Value::Object(_) => Ok(Self::deserialize(value)?),
            _ => Ok(Self::default()),
        }
    }
}

// Numbers and booleans are kept as their JSON text, null counts as absent
fn field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(value) => Some(value),
        other => Some(other.to_string()),
    })
}
