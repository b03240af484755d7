//! Database repositories for Chirpy
//!
//! Repositories encapsulate data access logic and provide a clean API for
//! business logic to interact with the database.

pub mod chirp;
pub mod refresh_token;
pub mod user;

pub use chirp::{ChirpRepository, ChirpRepositoryError};
pub use refresh_token::{RefreshTokenRepository, RefreshTokenRepositoryError};
pub use user::{UserRepository, UserRepositoryError};
