//! Moderation Statistics Module
//!
//! Counts moderation requests and their outcomes.

use serde::Serialize;

/// Moderation request counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModerationStats {
    /// Text moderation calls that reached the provider
    pub text_requests: u64,
    /// Image moderation calls that reached the provider
    pub image_requests: u64,
    /// Calls classified as hate speech or NSFW
    pub flagged: u64,
    /// Calls that failed at the provider
    pub failures: u64,
}

impl ModerationStats {
    /// Creates a new ModerationStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a text moderation outcome.
    pub fn record_text(&mut self, flagged: Option<bool>) {
        self.text_requests += 1;
        self.record_outcome(flagged);
    }

    /// Records an image moderation outcome.
    pub fn record_image(&mut self, flagged: Option<bool>) {
        self.image_requests += 1;
        self.record_outcome(flagged);
    }

    // `None` is a provider failure
    fn record_outcome(&mut self, flagged: Option<bool>) {
        match flagged {
            Some(true) => self.flagged += 1,
            Some(false) => {}
            None => self.failures += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let mut stats = ModerationStats::new();
        stats.record_text(Some(true));
        stats.record_text(Some(false));
        stats.record_image(None);

        assert_eq!(stats.text_requests, 2);
        assert_eq!(stats.image_requests, 1);
        assert_eq!(stats.flagged, 1);
        assert_eq!(stats.failures, 1);
    }
}
