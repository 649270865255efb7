//! Random Helpers

use base64::{Engine, engine::general_purpose};
use rand::{Rng, RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random integer in `0..upper` from the OS generator
///
/// Used for the collision-resistant suffix of generated file names.
pub fn random_below(upper: u64) -> u64 {
    OsRng.gen_range(0..upper)
}

/// URL-safe base64 without padding
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Random URL-safe token of `len` bytes of entropy
pub fn random_token(len: usize) -> String {
    to_base64_url(&random_bytes(len))
}
