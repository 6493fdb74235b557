//! Contact email construction

use askama::Template;
use serde::Serialize;

use crate::{config::EmailConfig, error::ContactError, form::ContactForm};

pub const SUBJECT_PREFIX: &str = "Novo contato do site Treid - ";

#[derive(Template)]
#[template(path = "emails/contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/contact.txt")]
struct ContactTextTemplate<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
    message: &'a str,
}

/// Fixed addressing of contact emails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addressing {
    pub from: String,
    pub to: String,
}

impl From<&EmailConfig> for Addressing {
    fn from(config: &EmailConfig) -> Self {
        Self {
            from: config.from_address.to_owned(),
            to: config.contact_address.to_owned(),
        }
    }
}

impl Default for Addressing {
    fn default() -> Self {
        Self::from(&EmailConfig::default())
    }
}

/// An email ready to hand to an [`EmailSender`](crate::email::EmailSender)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub to: Vec<String>,
    pub from: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl OutboundMessage {
    /// Build the notification for a contact form submission.
    ///
    /// Absent fields render as empty text. The HTML body escapes every field,
    /// the text body keeps them verbatim.
    pub fn contact(form: &ContactForm, addressing: &Addressing) -> Result<Self, ContactError> {
        let name = form.name.as_deref().unwrap_or_default();
        let email = form.email.as_deref().unwrap_or_default();
        let phone = form.phone.as_deref().unwrap_or_default();
        let company = form.company.as_deref().unwrap_or_default();
        let message = form.message.as_deref().unwrap_or_default();

        let html_body = ContactHtmlTemplate {
            name,
            email,
            phone,
            company,
            message,
        }
        .render()?;

        let text_body = ContactTextTemplate {
            name,
            email,
            phone,
            company,
            message,
        }
        .render()?;

        Ok(Self {
            to: vec![addressing.to.to_owned()],
            from: addressing.from.to_owned(),
            subject: format!("{SUBJECT_PREFIX}{name}"),
            html_body,
            text_body,
        })
    }
}
