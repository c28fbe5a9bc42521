//! Key Store Module
//!
//! In-memory set of issued API keys with validation bookkeeping.

use std::collections::HashSet;

use tracing::info;

use crate::keys::{generate_api_key, KeyStats};

// == Api Key Store ==
/// Unbounded in-memory store of issued API keys.
#[derive(Debug, Default)]
pub struct ApiKeyStore {
    /// Issued keys
    keys: HashSet<String>,
    /// Issuance and validation statistics
    stats: KeyStats,
}

impl ApiKeyStore {
    /// Creates an empty key store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Issue ==
    /// Generates a new key, stores it and returns it.
    pub fn issue(&mut self) -> String {
        let mut key = generate_api_key();
        // Regenerate on collision so len() always equals keys handed out.
        while self.keys.contains(&key) {
            key = generate_api_key();
        }
        self.keys.insert(key.clone());
        self.stats.record_issued();
        self.stats.set_total_keys(self.keys.len());

        info!("Generated new API key. Total keys: {}", self.keys.len());
        key
    }

    // == Validate ==
    /// Returns true if `key` was issued by this store.
    ///
    /// Missing and empty keys are always invalid.
    pub fn validate(&mut self, key: Option<&str>) -> bool {
        let valid = match key {
            Some(k) if !k.is_empty() => self.keys.contains(k),
            _ => false,
        };

        if valid {
            self.stats.record_accepted();
        } else {
            self.stats.record_rejected();
        }
        valid
    }

    /// Checks membership without touching the statistics.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of issued keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no key has been issued.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns a snapshot of the key statistics.
    pub fn stats(&self) -> KeyStats {
        self.stats.clone()
    }
}
