//! Stance relay daemon library
//!
//! Configuration loading and the axum router, split out of the binary so the
//! HTTP surface can be exercised in integration tests.

pub mod config;
pub mod server;

pub use config::{Config, ConfigError, CredentialStatus};
pub use server::{cors_layer, router, AppError, AppState};
