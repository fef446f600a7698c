//! Runtime configuration loaded from the environment.
//!
//! The only required secret is the generation-backend API key; its absence
//! is a fatal, descriptive error raised before any session handling runs.
//! Everything else has a default suitable for standalone execution.

use crate::utilities::errors::ConfigError;

/// Default Groq model used for generation.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Default output-length ceiling per generation.
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 500;

/// Runtime settings for the agent and its HTTP surface.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Groq API key (required).
    pub api_key: String,
    /// Groq API base URL.
    pub base_url: String,
    /// Model name for chat completions.
    pub model: String,
    /// Output-length ceiling applied to every generation.
    pub max_completion_tokens: u32,
    /// Listen host for standalone execution.
    pub host: String,
    /// Listen port for standalone execution.
    pub port: u16,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// | Variable                | Default                              |
    /// |-------------------------|--------------------------------------|
    /// | `GROQ_API_KEY`          | — (required)                         |
    /// | `GROQ_BASE_URL`         | `https://api.groq.com/openai/v1`     |
    /// | `GROQ_MODEL`            | `llama3-8b-8192`                     |
    /// | `MAX_COMPLETION_TOKENS` | `500`                                |
    /// | `HOST`                  | `0.0.0.0`                            |
    /// | `PORT`                  | `8000`                               |
    ///
    /// # Errors
    ///
    /// Fails if `GROQ_API_KEY` is unset or empty, or a numeric variable
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingSetting {
                setting: "GROQ_API_KEY",
            })?;

        let base_url = std::env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| crate::llms::providers::groq::DEFAULT_BASE_URL.to_string());

        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_completion_tokens = match std::env::var("MAX_COMPLETION_TOKENS") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::InvalidSetting {
                setting: "MAX_COMPLETION_TOKENS",
                message: format!("{e}: {raw}"),
            })?,
            Err(_) => DEFAULT_MAX_COMPLETION_TOKENS,
        };

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::InvalidSetting {
                setting: "PORT",
                message: format!("{e}: {raw}"),
            })?,
            Err(_) => 8000,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            max_completion_tokens,
            host,
            port,
        })
    }

    /// Socket address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
