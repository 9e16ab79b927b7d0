//! Nonce sources for request signing
//!
//! Every token embeds a random non-negative integer. The source is injected
//! into the client instead of living in a process-wide generator, so callers
//! can share one across threads or pin it in tests.

use rand::Rng;

/// A thread-safe supplier of signing nonces
pub trait NonceSource: Send + Sync {
    /// Produce the nonce for the next token
    fn next_nonce(&self) -> u32;
}

/// Nonces drawn from the thread-local CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn next_nonce(&self) -> u32 {
        // Kept within i32 range; the server parses `r` as a signed integer.
        rand::thread_rng().gen_range(0..=i32::MAX as u32)
    }
}

/// Always yields the same nonce
#[derive(Clone, Copy, Debug)]
pub struct FixedNonce(pub u32);

impl NonceSource for FixedNonce {
    fn next_nonce(&self) -> u32 {
        self.0
    }
}
