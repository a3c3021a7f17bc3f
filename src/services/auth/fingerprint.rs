//! Log-safe token fingerprints.
//!
//! Raw ID tokens never go to logs. base64url(SHA-256(token)) is enough to correlate a
//! sign-in with later requests carrying the same token.

use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Length of the prefix kept for logging.
const FINGERPRINT_LEN: usize = 16;

pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(FINGERPRINT_LEN);
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_and_short() {
        let a = token_fingerprint("header.payload.signature");
        assert_eq!(a, token_fingerprint("header.payload.signature"));
        assert_eq!(a.len(), FINGERPRINT_LEN);
        assert_ne!(a, token_fingerprint("header.payload.other"));
        assert!(!a.contains("payload"));
    }
}
