//! API Routes
//!
//! Configures the Axum router with all moderation server endpoints.

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    generate_key_handler, health_handler, moderate_image_handler, moderate_text_handler,
    stats_handler, upload_image_handler, AppState,
};
use super::middleware::{require_api_key, require_session};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/moderate-text` - Classify text for hate speech
/// - `POST /api/moderate-image` - Classify a data URI image for NSFW content
/// - `POST /api/moderate-image/upload` - Classify an uploaded image file
/// - `POST /api/keys` - Issue a new API key
/// - `GET /stats` - Key and moderation counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - API key gate on the moderation endpoints
/// - Session gate on key issuance
/// - Body limit sized for the largest accepted image
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let moderation = Router::new()
        .route("/api/moderate-text", post(moderate_text_handler))
        .route("/api/moderate-image", post(moderate_image_handler))
        .route("/api/moderate-image/upload", post(upload_image_handler))
        .route_layer(from_fn_with_state(state.clone(), require_api_key));

    let keys = Router::new()
        .route("/api/keys", post(generate_key_handler))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .merge(moderation)
        .merge(keys)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::moderation::GeminiModerator;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    // The provider is unreachable; these tests never get past the gates.
    fn create_test_app(config: Config) -> Router {
        let moderator =
            GeminiModerator::new("http://127.0.0.1:9", "test", None, Duration::from_secs(1))
                .unwrap();
        create_router(AppState::new(config, Arc::new(moderator)))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(Config::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_moderation_requires_api_key() {
        let app = create_test_app(Config::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/moderate-text")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_json_when_gate_disabled() {
        let config = Config {
            require_api_key: false,
            ..Config::default()
        };
        let app = create_test_app(config);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/moderate-text")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_key_issuance_requires_session_when_configured() {
        let config = Config {
            session_secret: Some("secret".to_string()),
            ..Config::default()
        };
        let app = create_test_app(config);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/keys")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
