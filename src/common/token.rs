//! Short random base-36 tokens for room and execution-job identifiers.
//!
//! Best-effort uniqueness, not a security boundary: the entropy comes from a
//! freshly generated UUID, which is more than enough to make collisions
//! operationally negligible at interview-tool scale.

use uuid::Uuid;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random lowercase base-36 token of the given length.
pub fn random_token(len: usize) -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut token = String::with_capacity(len);
    for _ in 0..len {
        token.push(ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    token
}
