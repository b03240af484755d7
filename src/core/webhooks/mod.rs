//! Inbound webhook endpoints

pub mod api;

pub use api::{WebhookApiState, webhook_api_router};
