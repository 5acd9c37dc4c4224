//! Admin access

use sha2::{Digest, Sha256};

pub(crate) mod middleware;

/// Hex-encoded SHA-256 digest of a bearer token.
pub(crate) fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
