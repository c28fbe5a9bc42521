//! Response DTOs for the moderation API
//!
//! Defines the structure of outgoing HTTP response bodies. Moderation
//! results are returned as-is from the moderation module.

use serde::{Deserialize, Serialize};

use crate::keys::KeyStats;
use crate::moderation::ModerationStats;

/// Response body for key issuance (POST /api/keys)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    /// The newly issued API key
    pub api_key: String,
    /// Issue time in ISO 8601 format
    pub created_at: String,
}

impl ApiKeyResponse {
    /// Creates a new ApiKeyResponse stamped with the current time
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// API key issuance and validation counters
    pub keys: KeyStats,
    /// Accepted key validations / all key validations
    pub key_acceptance_rate: f64,
    /// Moderation request counters
    pub moderation: ModerationStats,
}

impl StatsResponse {
    /// Creates a new StatsResponse from key and moderation counters
    pub fn new(keys: KeyStats, moderation: ModerationStats) -> Self {
        Self {
            key_acceptance_rate: keys.acceptance_rate(),
            keys,
            moderation,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Whether the moderation provider has credentials
    pub provider_configured: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(provider_configured: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            provider_configured,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    #[serde(default)]
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_response_serialize() {
        let resp = ApiKeyResponse::new("abc123");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"apiKey\":\"abc123\""));
        assert!(json.contains("createdAt"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy(false);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("\"provider_configured\":false"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_stats_response_serialize() {
        let resp = StatsResponse::new(KeyStats::new(), ModerationStats::new());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["keys"]["issued"], 0);
        assert_eq!(json["key_acceptance_rate"], 0.0);
        assert_eq!(json["moderation"]["flagged"], 0);
    }

    #[test]
    fn test_stats_response_acceptance_rate() {
        let mut keys = KeyStats::new();
        keys.record_accepted();
        keys.record_rejected();
        let resp = StatsResponse::new(keys, ModerationStats::new());
        assert!((resp.key_acceptance_rate - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
