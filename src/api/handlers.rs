//! API Handlers
//!
//! HTTP request handlers for each moderation server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Extension, Json,
};
use tracing::{error, info};

use crate::auth::SessionUser;
use crate::config::Config;
use crate::error::{GuardianError, Result};
use crate::keys::ApiKeyStore;
use crate::models::{
    ApiKeyResponse, HealthResponse, ModerateImageRequest, ModerateTextRequest, StatsResponse,
};
use crate::moderation::{
    DataUri, GeminiModerator, ImageModerationResult, ModerationError, ModerationStats, Moderator,
    TextModerationResult, SUPPORTED_IMAGE_TYPES,
};

/// Multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "imageFile";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Issued API keys
    pub keys: Arc<RwLock<ApiKeyStore>>,
    /// Moderation counters
    pub stats: Arc<RwLock<ModerationStats>>,
    /// Moderation backend
    pub moderator: Arc<dyn Moderator>,
    /// Server configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState around the given moderator.
    pub fn new(config: Config, moderator: Arc<dyn Moderator>) -> Self {
        Self {
            keys: Arc::new(RwLock::new(ApiKeyStore::new())),
            stats: Arc::new(RwLock::new(ModerationStats::new())),
            moderator,
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses the Gemini moderator configured by `config`.
    pub fn from_config(config: Config) -> std::result::Result<Self, ModerationError> {
        let moderator = GeminiModerator::from_config(&config)?;
        Ok(Self::new(config, Arc::new(moderator)))
    }
}

/// Handler for POST /api/moderate-text
///
/// Classifies text for hate speech.
pub async fn moderate_text_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ModerateTextRequest>, JsonRejection>,
) -> Result<Json<TextModerationResult>> {
    let Json(req) = payload.map_err(|e| invalid_json(e, "Text is too long."))?;
    if let Some(error_msg) = req.validate(state.config.max_text_length) {
        return Err(GuardianError::InvalidRequest(error_msg));
    }

    let result = state.moderator.moderate_text(&req.text).await;
    state
        .stats
        .write()
        .await
        .record_text(result.as_ref().ok().map(|r| r.is_hate_speech));

    let result = result.map_err(|e| {
        error!("Text moderation error: {}", e);
        e
    })?;
    Ok(Json(result))
}

/// Handler for POST /api/moderate-image
///
/// Classifies a base64 data URI image for NSFW content.
pub async fn moderate_image_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ModerateImageRequest>, JsonRejection>,
) -> Result<Json<ImageModerationResult>> {
    let max_bytes = state.config.max_image_bytes;
    let Json(req) = payload.map_err(|e| invalid_json(e, &size_message(max_bytes)))?;
    if let Some(error_msg) = req.validate() {
        return Err(GuardianError::InvalidRequest(error_msg));
    }

    let image = DataUri::parse(&req.image_data_uri).map_err(invalid_image_input)?;
    if !image.is_image() {
        return Err(invalid_image_input(format!(
            "imageDataUri must have an image MIME type, got {}",
            image.mime_type
        )));
    }
    if image.decoded_len() >= max_bytes {
        return Err(GuardianError::InvalidRequest(size_message(max_bytes)));
    }

    run_image_moderation(&state, &image).await.map(Json)
}

/// Handler for POST /api/moderate-image/upload
///
/// Accepts a multipart `imageFile` field, converts it to a data URI and
/// classifies it like the JSON endpoint.
pub async fn upload_image_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageModerationResult>> {
    let max_bytes = state.config.max_image_bytes;
    let mut multipart = multipart.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GuardianError::InvalidRequest(size_message(max_bytes))
        } else {
            GuardianError::InvalidRequest(format!("Invalid multipart body: {}", e))
        }
    })?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| invalid_multipart(e, max_bytes))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| invalid_multipart(e, max_bytes))?;
        upload = Some((content_type, bytes));
        break;
    }

    let (content_type, bytes) =
        upload.ok_or_else(|| GuardianError::InvalidRequest("Image file is required.".into()))?;
    let problems = upload_problems(&content_type, bytes.len(), max_bytes);
    if !problems.is_empty() {
        return Err(GuardianError::InvalidRequest(problems.join(", ")));
    }

    let image = DataUri::from_bytes(content_type, &bytes);
    run_image_moderation(&state, &image).await.map(Json)
}

/// Handler for POST /api/keys
///
/// Issues a new API key. Gated by the session middleware.
pub async fn generate_key_handler(
    State(state): State<AppState>,
    user: Option<Extension<SessionUser>>,
) -> Json<ApiKeyResponse> {
    let key = state.keys.write().await.issue();
    if let Some(Extension(user)) = user {
        info!(user = %user.id, "API key issued");
    }
    Json(ApiKeyResponse::new(key))
}

/// Handler for GET /stats
///
/// Returns key and moderation counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let keys = state.keys.read().await.stats();
    let moderation = state.stats.read().await.clone();

    Json(StatsResponse::new(keys, moderation))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.moderator.is_configured()))
}

// == Helpers ==

async fn run_image_moderation(state: &AppState, image: &DataUri) -> Result<ImageModerationResult> {
    let result = state.moderator.moderate_image(image).await;
    state
        .stats
        .write()
        .await
        .record_image(result.as_ref().ok().map(|r| r.is_nsfw));

    result.map_err(|e| {
        error!("Image moderation error: {}", e);
        GuardianError::from(e)
    })
}

// Bodies cut off by the router's body limit get the size message.
fn invalid_json(rejection: JsonRejection, too_large: &str) -> GuardianError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GuardianError::InvalidRequest(too_large.to_string())
    } else {
        GuardianError::InvalidRequest("Invalid JSON input.".to_string())
    }
}

fn invalid_multipart(error: MultipartError, max_bytes: usize) -> GuardianError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GuardianError::InvalidRequest(size_message(max_bytes))
    } else {
        GuardianError::InvalidRequest(format!("Invalid multipart body: {}", error))
    }
}

fn invalid_image_input(msg: impl std::fmt::Display) -> GuardianError {
    GuardianError::InvalidRequest(format!("Invalid input for image moderation: {}", msg))
}

fn size_message(max_bytes: usize) -> String {
    format!(
        "Image file size should be less than {}MB.",
        max_bytes / (1024 * 1024)
    )
}

/// Collects every problem with an uploaded file.
fn upload_problems(content_type: &str, len: usize, max_bytes: usize) -> Vec<String> {
    let mut problems = Vec::new();
    if len == 0 {
        problems.push("Image file is required.".to_string());
    }
    if len >= max_bytes {
        problems.push(size_message(max_bytes));
    }
    if !SUPPORTED_IMAGE_TYPES.contains(&content_type) {
        problems.push(
            "Invalid image format. Supported formats: JPEG, PNG, WebP, GIF.".to_string(),
        );
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Returns fixed verdicts without any network access.
    struct FixedModerator {
        flagged: bool,
    }

    #[async_trait]
    impl Moderator for FixedModerator {
        async fn moderate_text(
            &self,
            _text: &str,
        ) -> std::result::Result<TextModerationResult, ModerationError> {
            Ok(TextModerationResult {
                is_hate_speech: self.flagged,
                confidence_score: 0.9,
            })
        }

        async fn moderate_image(
            &self,
            _image: &DataUri,
        ) -> std::result::Result<ImageModerationResult, ModerationError> {
            Ok(ImageModerationResult {
                is_nsfw: self.flagged,
                confidence: 0.8,
            })
        }
    }

    fn test_state(flagged: bool) -> AppState {
        AppState::new(Config::default(), Arc::new(FixedModerator { flagged }))
    }

    #[tokio::test]
    async fn test_moderate_text_handler() {
        let state = test_state(true);
        let req = ModerateTextRequest {
            text: "some text".to_string(),
        };

        let response = moderate_text_handler(State(state.clone()), Ok(Json(req)))
            .await
            .unwrap();
        assert!(response.is_hate_speech);

        let stats = state.stats.read().await;
        assert_eq!(stats.text_requests, 1);
        assert_eq!(stats.flagged, 1);
    }

    #[tokio::test]
    async fn test_moderate_text_empty() {
        let state = test_state(false);
        let req = ModerateTextRequest {
            text: String::new(),
        };

        let result = moderate_text_handler(State(state.clone()), Ok(Json(req))).await;
        assert!(matches!(result, Err(GuardianError::InvalidRequest(_))));
        assert_eq!(state.stats.read().await.text_requests, 0);
    }

    #[tokio::test]
    async fn test_moderate_image_handler() {
        let state = test_state(false);
        let req = ModerateImageRequest {
            image_data_uri: DataUri::from_bytes("image/png", b"png-bytes").to_string(),
        };

        let response = moderate_image_handler(State(state), Ok(Json(req)))
            .await
            .unwrap();
        assert!(!response.is_nsfw);
    }

    #[tokio::test]
    async fn test_moderate_image_rejects_non_image() {
        let state = test_state(false);
        let req = ModerateImageRequest {
            image_data_uri: "data:text/plain;base64,aGk=".to_string(),
        };

        let err = moderate_image_handler(State(state), Ok(Json(req)))
            .await
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Invalid input for image moderation:"));
    }

    #[tokio::test]
    async fn test_moderate_image_rejects_oversized() {
        let config = Config {
            max_image_bytes: 4,
            ..Config::default()
        };
        let state = AppState::new(config, Arc::new(FixedModerator { flagged: false }));
        let req = ModerateImageRequest {
            image_data_uri: DataUri::from_bytes("image/png", b"too large").to_string(),
        };

        let err = moderate_image_handler(State(state), Ok(Json(req)))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Image file size should be less than"));
    }

    #[tokio::test]
    async fn test_generate_key_handler() {
        let state = test_state(false);

        let response = generate_key_handler(State(state.clone()), None).await;
        assert!(state.keys.write().await.validate(Some(&response.api_key)));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(test_state(false))).await;
        assert_eq!(response.status, "healthy");
        assert!(response.provider_configured);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state(false);
        generate_key_handler(State(state.clone()), None).await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.keys.issued, 1);
        assert_eq!(response.moderation.text_requests, 0);
    }

    #[test]
    fn test_upload_problems() {
        let max = 10 * 1024 * 1024;
        assert!(upload_problems("image/png", 10, max).is_empty());
        assert_eq!(
            upload_problems("image/png", 0, max),
            vec!["Image file is required.".to_string()]
        );
        assert_eq!(upload_problems("image/bmp", max, max).len(), 2);
        assert_eq!(
            size_message(max),
            "Image file size should be less than 10MB."
        );
    }
}
