pub mod cli;
pub mod config;
pub mod email;
pub mod error;
pub mod event;
pub mod form;
pub mod handler;
pub mod message;
pub mod observability;
pub mod response;
pub mod routes;

pub use config::Config;
pub use email::{DeliveryReceipt, EmailSender, EmailService};
pub use error::ContactError;
pub use event::InboundEvent;
pub use form::ContactForm;
pub use handler::ContactHandler;
pub use message::{Addressing, OutboundMessage};
pub use response::{Cors, OutboundResponse};
