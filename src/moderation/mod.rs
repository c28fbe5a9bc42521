//! Moderation Module
//!
//! Text and image classification delegated to a hosted model.
//!
//! # Flows
//! - Text: hate speech detection with a confidence score
//! - Image: NSFW detection with a confidence score

mod data_uri;
mod error;
mod gemini;
mod stats;
mod traits;
mod types;

pub use data_uri::{DataUri, DataUriError};
pub use error::ModerationError;
pub use gemini::{GeminiModerator, IMAGE_PROMPT, TEXT_PROMPT};
pub use stats::ModerationStats;
pub use traits::Moderator;
pub use types::{ImageModerationResult, TextModerationResult};

// == Public Constants ==
/// Image MIME types accepted for file uploads
pub const SUPPORTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];
