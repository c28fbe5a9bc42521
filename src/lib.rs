//! Content Guardian - Text and image content moderation service
//!
//! Classifies text and images with a hosted model and gates access with
//! in-memory API keys.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod keys;
pub mod models;
pub mod moderation;

pub use api::AppState;
pub use client::ContentGuardianClient;
pub use config::Config;
pub use error::GuardianError;
