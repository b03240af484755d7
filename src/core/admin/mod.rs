//! Admin endpoints and fileserver metrics

pub mod api;

pub use api::{AdminApiState, admin_api_router, track_hits};
