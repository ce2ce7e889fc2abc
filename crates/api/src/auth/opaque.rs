//! Opaque secrets for refresh tokens and password reset links.
//!
//! The secret goes to the client once; only its SHA-256 digest is stored, and
//! lookups digest the presented value first.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// A freshly generated secret and the digest to persist for it.
#[derive(Debug)]
pub struct OpaqueToken {
    pub secret: String,
    pub digest: String,
}

impl OpaqueToken {
    /// 256 random bits from two v4 UUIDs, hex encoded.
    pub fn generate() -> Self {
        let secret = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        Self {
            digest: digest(&secret),
            secret,
        }
    }
}

/// Hex SHA-256 of a presented secret, as stored in `token_hash` columns.
pub fn digest(secret: &str) -> String {
    format!("{:x}", Sha256::digest(secret.as_bytes()))
}
