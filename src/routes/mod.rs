use axum::{
    Router,
    routing::{any, get},
};

use crate::handler::ContactHandler;

mod contact;
mod health;

pub fn router(handler: ContactHandler) -> Router {
    Router::new()
        // Health check endpoint, answered outside the contact handler
        .route("/health", get(health::health))
        .route("/", any(contact::invoke))
        .fallback(contact::invoke)
        .with_state(handler)
}
