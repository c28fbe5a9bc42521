//! Moderator trait: the seam between HTTP handlers and the model provider.

use async_trait::async_trait;

use crate::moderation::{DataUri, ImageModerationResult, ModerationError, TextModerationResult};

/// A backend able to classify text and images.
#[async_trait]
pub trait Moderator: Send + Sync {
    /// Classifies `text` for hate speech.
    async fn moderate_text(&self, text: &str) -> Result<TextModerationResult, ModerationError>;

    /// Classifies an image for NSFW content.
    async fn moderate_image(
        &self,
        image: &DataUri,
    ) -> Result<ImageModerationResult, ModerationError>;

    /// Whether the backend can serve requests at all.
    fn is_configured(&self) -> bool {
        true
    }
}
