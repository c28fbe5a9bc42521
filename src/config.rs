//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Default Gemini model used for moderation prompts.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default session cookie name.
pub const DEFAULT_SESSION_COOKIE: &str = "guardian_session";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// API key for the Gemini provider
    pub gemini_api_key: Option<String>,
    /// Model name used for both moderation flows
    pub gemini_model: String,
    /// Base URL of the Gemini REST API
    pub gemini_base_url: String,
    /// Maximum accepted text length in characters
    pub max_text_length: usize,
    /// Maximum accepted image size in bytes (decoded)
    pub max_image_bytes: usize,
    /// Whether moderation endpoints require an `X-API-Key` header
    pub require_api_key: bool,
    /// Secret used to verify session tokens; key issuance is open when unset
    pub session_secret: Option<String>,
    /// Name of the cookie carrying the session token
    pub session_cookie: String,
    /// Timeout for outbound provider requests in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 9002)
    /// - `GEMINI_API_KEY` - Provider API key (default: unset)
    /// - `GEMINI_MODEL` - Model name (default: gemini-2.0-flash)
    /// - `GEMINI_BASE_URL` - Provider base URL
    /// - `MAX_TEXT_LENGTH` - Maximum text length (default: 5000)
    /// - `MAX_IMAGE_BYTES` - Maximum image size (default: 10 MiB)
    /// - `REQUIRE_API_KEY` - Gate moderation behind API keys (default: true)
    /// - `SESSION_SECRET` - Session token signing secret (default: unset)
    /// - `SESSION_COOKIE` - Session cookie name (default: guardian_session)
    /// - `REQUEST_TIMEOUT_SECS` - Provider request timeout (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: non_empty_var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: non_empty_var("GEMINI_BASE_URL")
                .unwrap_or(defaults.gemini_base_url),
            max_text_length: parse_var("MAX_TEXT_LENGTH").unwrap_or(defaults.max_text_length),
            max_image_bytes: parse_var("MAX_IMAGE_BYTES").unwrap_or(defaults.max_image_bytes),
            require_api_key: env::var("REQUIRE_API_KEY")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.require_api_key),
            session_secret: non_empty_var("SESSION_SECRET"),
            session_cookie: non_empty_var("SESSION_COOKIE").unwrap_or(defaults.session_cookie),
            request_timeout: parse_var("REQUEST_TIMEOUT_SECS").unwrap_or(defaults.request_timeout),
        }
    }

    /// Largest request body accepted by the router.
    ///
    /// Base64 inflates images by 4/3, plus slack for the JSON envelope
    /// and multipart headers.
    pub fn max_body_bytes(&self) -> usize {
        self.max_image_bytes / 3 * 4 + 64 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 9002,
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            max_text_length: 5000,
            max_image_bytes: 10 * 1024 * 1024,
            require_api_key: true,
            session_secret: None,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            request_timeout: 30,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
