//! Client Module
//!
//! Typed HTTP client for the moderation API, for services that call a
//! running Content Guardian server.

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::api::API_KEY_HEADER;
use crate::models::{ErrorResponse, ModerateImageRequest, ModerateTextRequest};
use crate::moderation::{ImageModerationResult, TextModerationResult};

const TEXT_PATH: &str = "/api/moderate-text";
const IMAGE_PATH: &str = "/api/moderate-image";

/// Errors returned by [`ContentGuardianClient`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected before any request was sent
    #[error("{0}")]
    InvalidInput(String),

    /// The server answered with a non-success status
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The request could not be sent or the response could not be read
    #[error("Error during request to {path}: {source}")]
    Transport {
        path: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Client for the moderation endpoints.
#[derive(Debug, Clone)]
pub struct ContentGuardianClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ContentGuardianClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// An empty base URL is allowed; a single trailing slash is removed.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
            api_key: None,
        }
    }

    /// Sends `key` in the `X-API-Key` header on every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Moderates text for hate speech.
    pub async fn moderate_text(&self, text: &str) -> Result<TextModerationResult, ClientError> {
        if text.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "Text input for moderation cannot be empty.".to_string(),
            ));
        }
        let body = ModerateTextRequest {
            text: text.to_string(),
        };
        self.post(TEXT_PATH, &body).await
    }

    /// Moderates a `data:image/...;base64,...` URI for NSFW content.
    pub async fn moderate_image(
        &self,
        image_data_uri: &str,
    ) -> Result<ImageModerationResult, ClientError> {
        if !image_data_uri.starts_with("data:image/") {
            return Err(ClientError::InvalidInput(
                "Invalid imageDataUri format. Expected \"data:image/...;base64,...\"".to_string(),
            ));
        }
        if !image_data_uri.contains(";base64,") {
            return Err(ClientError::InvalidInput(
                "imageDataUri missing \";base64,\" part.".to_string(),
            ));
        }
        let body = ModerateImageRequest {
            image_data_uri: image_data_uri.to_string(),
        };
        self.post(IMAGE_PATH, &body).await
    }

    async fn post<B, T>(&self, path: &'static str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let transport = |source: reqwest::Error| ClientError::Transport { path, source };

        let mut request = self.http.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let response = request.send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let fallback = || format!("API request failed with status {} at {}", status.as_u16(), url);
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) if !body.error.is_empty() => body.error,
                // JSON without an `error` field
                Ok(_) => fallback(),
                Err(_) => status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(fallback),
            };
            let message = if message.contains(path) || message.contains(&url) {
                message
            } else {
                format!("Error during request to {}: {}", path, message)
            };
            return Err(ClientError::Api { status, message });
        }

        response.json().await.map_err(transport)
    }
}
