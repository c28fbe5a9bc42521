//! Key Statistics Module
//!
//! Tracks issuance and validation outcomes for API keys.

use serde::Serialize;

// == Key Stats ==
/// Tracks API key metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeyStats {
    /// Number of keys issued since startup
    pub issued: u64,
    /// Number of validations that matched an issued key
    pub accepted: u64,
    /// Number of validations that failed (missing or unknown key)
    pub rejected: u64,
    /// Current number of keys in the store
    pub total_keys: usize,
}

impl KeyStats {
    // == Constructor ==
    /// Creates a new KeyStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Acceptance Rate ==
    /// Returns accepted / (accepted + rejected), or 0.0 if nothing was validated.
    pub fn acceptance_rate(&self) -> f64 {
        let total = self.accepted + self.rejected;
        if total == 0 {
            0.0
        } else {
            self.accepted as f64 / total as f64
        }
    }

    /// Increments the issued counter.
    pub fn record_issued(&mut self) {
        self.issued += 1;
    }

    /// Increments the accepted counter.
    pub fn record_accepted(&mut self) {
        self.accepted += 1;
    }

    /// Increments the rejected counter.
    pub fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    /// Updates the total key count.
    pub fn set_total_keys(&mut self, count: usize) {
        self.total_keys = count;
    }
}
