//! Chirp endpoints

pub mod api;

pub use api::{ChirpApiState, chirp_api_router};
