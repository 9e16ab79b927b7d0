//! Content hashing using SHA-1
//!
//! The storage service identifies file content and individual slices by the
//! uppercase hex SHA-1 of their bytes. It uses this for:
//! - Whole-file deduplication on the first slice of a resumable upload
//! - Per-slice integrity checks
//! - Simple (single request) upload verification

use sha1::{Digest, Sha1};

/// Size of a SHA-1 digest in bytes
pub const SHA1_BYTE_SIZE: usize = 20;

/// An incremental hasher for streaming data
#[derive(Clone)]
pub struct ContentHasher {
    hasher: Sha1,
    bytes_processed: u64,
}

impl ContentHasher {
    /// Create a new incremental hasher
    pub fn new() -> Self {
        Self {
            hasher: Sha1::new(),
            bytes_processed: 0,
        }
    }

    /// Update the hasher with more data
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.bytes_processed += data.len() as u64;
    }

    /// Get the number of bytes processed
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_processed
    }

    /// Finalize and return the raw digest
    pub fn finalize(self) -> [u8; SHA1_BYTE_SIZE] {
        let mut out = [0u8; SHA1_BYTE_SIZE];
        out.copy_from_slice(&self.hasher.finalize());
        out
    }

    /// Finalize and return the digest as uppercase hex, the form the server expects
    pub fn finalize_hex(self) -> String {
        hex::encode_upper(self.finalize())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercase hex SHA-1 of the given data
pub fn sha1_hex(data: &[u8]) -> String {
    hex::encode_upper(Sha1::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(sha1_hex(b""), "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709");
        assert_eq!(sha1_hex(b"abc"), "A9993E364706816ABA3E25717850C26C9CD0D89D");
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let data = b"Hello, World!";

        let mut hasher = ContentHasher::new();
        hasher.update(b"Hello, ");
        hasher.update(b"World!");
        assert_eq!(hasher.bytes_processed(), data.len() as u64);

        assert_eq!(hasher.finalize_hex(), sha1_hex(data));
    }

    #[test]
    fn test_hex_is_uppercase() {
        let hex = sha1_hex(b"some content");
        assert_eq!(hex.len(), SHA1_BYTE_SIZE * 2);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
