use anyhow::{Context, Result};

use crate::sanitize::DEFAULT_MAX_LENGTH;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Character cap applied by the input sanitizer to every text field.
    pub max_input_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_input_chars: std::env::var("MAX_INPUT_CHARS")
                .unwrap_or_else(|_| DEFAULT_MAX_LENGTH.to_string())
                .parse::<usize>()
                .context("MAX_INPUT_CHARS must be a positive integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
