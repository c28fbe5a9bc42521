//! Moderation error types.

use thiserror::Error;

/// Failures of a moderation flow.
#[derive(Error, Debug)]
pub enum ModerationError {
    /// No provider credentials were configured
    #[error("Moderation provider is not configured: set GEMINI_API_KEY")]
    NotConfigured,

    /// The request could not be delivered
    #[error("Moderation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Moderation provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// The provider refused to classify the input
    #[error("Moderation provider blocked the request: {0}")]
    Blocked(String),

    /// The provider answered without any candidate output
    #[error("Moderation provider returned no output")]
    EmptyResponse,

    /// The model output did not match the expected schema
    #[error("Moderation output was invalid: {0}")]
    InvalidOutput(String),
}
