//! Content hashing for exported artifacts.
//!
//! Programs and export files are fingerprinted with SHA-256 so a bundle
//! manifest can record exactly which text was produced.

use sha2::{Digest, Sha256};

/// A 32-byte SHA-256 content hash.
pub type ContentHash = [u8; 32];

/// Compute the SHA-256 hash of raw bytes.
pub fn content_hash(bytes: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Format a content hash as a hex string.
pub fn hash_hex(hash: &ContentHash) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_hash() {
        let h1 = content_hash(b"IF NOT E_STOP THEN");
        let h2 = content_hash(b"IF NOT E_STOP THEN");
        assert_eq!(h1, h2);
    }

    #[test]
    fn different_inputs_different_hash() {
        let h1 = content_hash(b"Motor := TRUE;");
        let h2 = content_hash(b"Motor := FALSE;");
        assert_ne!(h1, h2);
    }

    #[test]
    fn hash_hex_format() {
        let hex = hash_hex(&content_hash(b""));
        assert_eq!(hex.len(), 64);
        // SHA-256 of the empty string
        assert!(hex.starts_with("e3b0c442"));
    }
}
