//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and the length policy.
//! - [`jwt`] -- signed access tokens.
//! - [`opaque`] -- refresh and reset secrets stored as SHA-256 digests.

pub mod jwt;
pub mod opaque;
pub mod password;
