//! Post mutation credential.
//!
//! # Responsibility
//! - Turn the per-request plaintext password into a stored digest.
//! - Compare candidates without early exit on the first differing byte.
//!
//! # Invariants
//! - Only the SHA-256 hex digest is persisted.
//! - `verify` returns a plain `bool`; callers map every `false` to the same
//!   forbidden outcome.

use sha2::{Digest, Sha256};
use std::fmt::{Debug, Formatter};

const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 hex digest of a post password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes a plaintext password.
    pub fn from_plaintext(password: &str) -> Self {
        Self(digest_hex(password))
    }

    /// Wraps a digest loaded from storage.
    ///
    /// Returns `None` when `stored` is not a lowercase 64-char hex digest.
    pub fn from_stored(stored: impl Into<String>) -> Option<Self> {
        let stored = stored.into();
        let well_formed = stored.len() == DIGEST_HEX_LEN
            && stored
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then_some(Self(stored))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks a plaintext candidate against this digest in constant time.
    pub fn verify(&self, candidate: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), digest_hex(candidate).as_bytes())
    }
}

impl Debug for PasswordHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

fn digest_hex(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    // Both sides are fixed-length digests; the length check leaks nothing
    // about the plaintext.
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
