//! API Module
//!
//! HTTP handlers and routing for the moderation server REST API.
//!
//! # Endpoints
//! - `POST /api/moderate-text` - Classify text for hate speech
//! - `POST /api/moderate-image` - Classify a data URI image
//! - `POST /api/moderate-image/upload` - Classify an uploaded image file
//! - `POST /api/keys` - Issue an API key
//! - `GET /stats` - Counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::{require_api_key, require_session, API_KEY_HEADER};
pub use routes::create_router;
