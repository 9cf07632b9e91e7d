//! Operator API tokens.
//!
//! A token is `till_` followed by 32 random bytes in lowercase hex. Only its
//! SHA-256 digest is stored.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Operator token prefix.
pub const TOKEN_PREFIX: &str = "till_";

/// Number of secret bytes encoded in a token.
pub const TOKEN_SECRET_BYTES: usize = 32;

/// Generate a new raw token.
#[must_use]
pub fn generate_token() -> String {
    let mut secret = [0_u8; TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    let token = format!("{TOKEN_PREFIX}{}", hex::encode(secret));

    secret.zeroize();

    token
}

/// Digest under which a token is stored and looked up.
#[must_use]
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_have_prefix_and_hex_secret() {
        let token = generate_token();

        let secret = token.strip_prefix(TOKEN_PREFIX).expect("prefixed token");

        assert_eq!(secret.len(), TOKEN_SECRET_BYTES * 2);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_tokens_differ() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn hash_token_is_sha256_hex() {
        assert_eq!(
            hash_token(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
