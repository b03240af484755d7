//! Authentication module for Chirpy
//!
//! This module is the security core of the service:
//! - Password hashing and verification
//! - Credential extraction from the Authorization header
//! - Signed access token issuance and verification
//! - Opaque refresh token generation
//! - The session authority tying them together, plus its REST endpoints

pub mod api;
pub mod headers;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod service;

pub use api::{ApiError, AuthApiState, LoginRequest, auth_api_router};
pub use headers::{HeaderCredentialError, api_key, bearer_token};
pub use jwt::{Claims, JwtError, JwtService, TOKEN_ISSUER};
pub use password::{PasswordError, hash_password, verify_password};
pub use refresh::generate_refresh_token;
pub use service::{AuthError, AuthService, LoginResponse};
