//! Gemini-backed moderator.
//!
//! Calls the `generateContent` REST endpoint in JSON response mode with a
//! response schema, then validates the decoded output.
//!
//! API docs: https://ai.google.dev/api/generate-content

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::moderation::{
    DataUri, ImageModerationResult, ModerationError, Moderator, TextModerationResult,
};

/// Prompt for the text flow; the text is appended after it.
pub const TEXT_PROMPT: &str = "You are an AI content moderator. Determine if the following text is hate speech. Return a boolean value for isHateSpeech and a confidence score between 0 and 1.";

/// Prompt for the image flow; the image follows as inline data.
pub const IMAGE_PROMPT: &str = "You are an AI content moderation expert. Analyze the image provided to determine if it contains NSFW (Not Safe For Work) content.\n\nRespond with a JSON object indicating whether the image is NSFW and a confidence score (0-1) for your assessment.";

/// Moderator backed by a Gemini model.
pub struct GeminiModerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiModerator {
    /// Creates a moderator with an explicit endpoint and credentials.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ModerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into();
        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a moderator from server configuration.
    pub fn from_config(config: &Config) -> Result<Self, ModerationError> {
        Self::new(
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate<T: DeserializeOwned>(
        &self,
        parts: Vec<RequestPart>,
        schema: Value,
    ) -> Result<T, ModerationError> {
        let api_key = self.api_key.as_deref().ok_or(ModerationError::NotConfigured)?;

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status, "Moderation provider returned an error");
            return Err(ModerationError::Provider { status, body });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = extract_text(body)?;
        debug!(model = %self.model, output = %text, "Model output received");

        serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| ModerationError::InvalidOutput(e.to_string()))
    }
}

#[async_trait]
impl Moderator for GeminiModerator {
    async fn moderate_text(&self, text: &str) -> Result<TextModerationResult, ModerationError> {
        let prompt = format!("{}\n\nText: {}", TEXT_PROMPT, text);
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "isHateSpeech": { "type": "BOOLEAN", "description": "Whether the text is hate speech." },
                "confidenceScore": { "type": "NUMBER", "description": "The confidence score of the hate speech detection." }
            },
            "required": ["isHateSpeech", "confidenceScore"]
        });

        let result: TextModerationResult = self
            .generate(vec![RequestPart::Text { text: prompt }], schema)
            .await?;
        result.validated()
    }

    async fn moderate_image(
        &self,
        image: &DataUri,
    ) -> Result<ImageModerationResult, ModerationError> {
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "isNsfw": { "type": "BOOLEAN", "description": "Whether the image is NSFW (Not Safe For Work)." },
                "confidence": { "type": "NUMBER", "description": "Confidence score that the image is NSFW, ranging from 0 to 1." }
            },
            "required": ["isNsfw", "confidence"]
        });
        let parts = vec![
            RequestPart::Text {
                text: IMAGE_PROMPT.to_string(),
            },
            RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            },
        ];

        let result: ImageModerationResult = self.generate(parts, schema).await?;
        result.validated()
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Pulls the first candidate's text out of a response.
fn extract_text(response: GenerateContentResponse) -> Result<String, ModerationError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(ModerationError::Blocked(reason));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(ModerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}

/// Strips a surrounding markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

// --- generateContent request/response types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
