//! Request and Response models for the moderation API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ModerateImageRequest, ModerateTextRequest};
pub use responses::{ApiKeyResponse, ErrorResponse, HealthResponse, StatsResponse};
