//! Error types for the ashley pipeline.

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
///
/// These are fatal: they are surfaced before any session handling starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent.
    #[error("{setting} not found. Set it in the environment before starting.")]
    MissingSetting { setting: &'static str },

    /// A setting is present but cannot be parsed.
    #[error("Invalid value for {setting}: {message}")]
    InvalidSetting { setting: &'static str, message: String },
}

/// Errors from the generation client boundary.
///
/// Only request-setup failures surface as this type; mid-stream failures
/// arrive as [`crate::llms::streaming::StreamChunk::Error`] chunks so the
/// caller can pattern-match instead of unwinding.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Transport-level failure (connect, TLS, request write).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected the request.
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },
}

/// Errors from persona prompt rendering.
///
/// A missing placeholder value is a programming error and must fail loudly;
/// the template engine never silently drops a substitution.
#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("Persona template rendering failed: {0}")]
    Template(#[from] tera::Error),
}
