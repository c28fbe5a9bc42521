//! Key Generator Module
//!
//! Produces random hexadecimal API keys from the OS random source.

use rand::{rngs::OsRng, RngCore};

use crate::keys::KEY_BYTES;

/// Generates a new API key: `KEY_BYTES` random bytes encoded as lowercase hex.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KEY_HEX_LENGTH;

    #[test]
    fn test_key_is_lowercase_hex() {
        let key = generate_api_key();
        assert_eq!(key.len(), KEY_HEX_LENGTH);
        assert!(key.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_keys_differ() {
        assert_ne!(generate_api_key(), generate_api_key());
    }
}
