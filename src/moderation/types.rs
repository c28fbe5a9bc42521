//! Moderation result types.
//!
//! Field names are camelCase on the wire; clients depend on them.

use serde::{Deserialize, Serialize};

use crate::moderation::ModerationError;

/// Outcome of the text moderation flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextModerationResult {
    /// Whether the text is hate speech
    pub is_hate_speech: bool,
    /// Confidence of the classification, 0 to 1
    pub confidence_score: f64,
}

/// Outcome of the image moderation flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageModerationResult {
    /// Whether the image is NSFW
    #[serde(rename = "isNsfw")]
    pub is_nsfw: bool,
    /// Confidence that the image is NSFW, 0 to 1
    pub confidence: f64,
}

impl TextModerationResult {
    /// Rejects confidence scores outside `[0, 1]`.
    pub fn validated(self) -> Result<Self, ModerationError> {
        check_unit_interval("confidenceScore", self.confidence_score)?;
        Ok(self)
    }
}

impl ImageModerationResult {
    /// Rejects confidence scores outside `[0, 1]`.
    pub fn validated(self) -> Result<Self, ModerationError> {
        check_unit_interval("confidence", self.confidence)?;
        Ok(self)
    }
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ModerationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModerationError::InvalidOutput(format!(
            "{} must be between 0 and 1, got {}",
            field, value
        )))
    }
}
