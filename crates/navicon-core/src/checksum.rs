//! SHA-256 digests of icon payloads.
//!
//! Stored next to each blob and served as the strong `ETag` of the
//! retrieval endpoint.

use sha2::{Digest, Sha256};

/// Compute SHA-256 of `data` and return the digest as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
