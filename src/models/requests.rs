//! Request DTOs for the moderation API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Serialize};

/// Request body for POST /api/moderate-text
///
/// A missing `text` field deserializes as empty so it fails validation
/// with the same message as an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateTextRequest {
    /// The text to moderate
    #[serde(default)]
    pub text: String,
}

impl ModerateTextRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, max_length: usize) -> Option<String> {
        if self.text.is_empty() {
            return Some("Text cannot be empty.".to_string());
        }
        if self.text.chars().count() > max_length {
            return Some("Text is too long.".to_string());
        }
        None
    }
}

/// Request body for POST /api/moderate-image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateImageRequest {
    /// The image as `data:<mimetype>;base64,<data>`
    #[serde(rename = "imageDataUri", default)]
    pub image_data_uri: String,
}

impl ModerateImageRequest {
    /// Validates the request data
    ///
    /// Only checks presence; the data URI itself is parsed by the handler.
    pub fn validate(&self) -> Option<String> {
        if self.image_data_uri.is_empty() {
            return Some("imageDataUri cannot be empty.".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_request_deserialize() {
        let req: ModerateTextRequest = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(req.text, "hello");
        assert!(req.validate(5000).is_none());
    }

    #[test]
    fn test_text_request_missing_field_is_empty() {
        let req: ModerateTextRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.validate(5000).as_deref(), Some("Text cannot be empty."));
    }

    #[test]
    fn test_text_request_too_long() {
        let req = ModerateTextRequest {
            text: "é".repeat(11),
        };
        assert_eq!(req.validate(10).as_deref(), Some("Text is too long."));
        assert!(req.validate(11).is_none());
    }

    #[test]
    fn test_image_request_wire_name() {
        let req: ModerateImageRequest =
            serde_json::from_str(r#"{"imageDataUri": "data:image/png;base64,AA=="}"#).unwrap();
        assert!(req.image_data_uri.starts_with("data:image/png"));
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_image_request_empty() {
        let req: ModerateImageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(
            req.validate().as_deref(),
            Some("imageDataUri cannot be empty.")
        );
    }
}
