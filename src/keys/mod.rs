//! Keys Module
//!
//! Issues and validates the API keys that gate the moderation endpoints.
//! Keys live only in process memory: no persistence, expiry or revocation.

mod generator;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use generator::generate_api_key;
pub use stats::KeyStats;
pub use store::ApiKeyStore;

// == Public Constants ==
/// Number of random bytes in a generated key
pub const KEY_BYTES: usize = 24;

/// Length of a generated key in hex characters
pub const KEY_HEX_LENGTH: usize = KEY_BYTES * 2;
