//! Opaque refresh token generation
//!
//! A refresh token is 32 bytes from the OS CSPRNG, hex-encoded (256 bits of
//! entropy). The token itself carries no identity; it binds to a user only
//! through its storage record.

use rand::RngCore;
use rand::rngs::OsRng;

/// Number of random bytes in a refresh token (hex-encoded to 64 chars)
const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate a new opaque refresh token
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_64_lowercase_hex_chars() {
        let token = generate_refresh_token();

        assert_eq!(token.len(), 64);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_refresh_token();
        let b = generate_refresh_token();

        assert_ne!(a, b);
    }
}
