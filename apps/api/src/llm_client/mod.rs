//! LLM Client — the single point of entry for all generative-model calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Anthropic API directly.
//! Every stage consumes the model through the narrow `Oracle` trait and must
//! define its own fallback before integration: the oracle is treated as
//! unreliable and its output as unstructured text with no guarantees.
//!
//! One attempt per call, no internal retries. A single failure is enough to
//! send the calling stage down its fallback path; the 120 s client timeout
//! bounds the attempt and surfaces as an ordinary HTTP error.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,
}

/// The generative oracle seam. `generate` returns the model's raw text
/// response; callers own all parsing and all recovery.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, OracleError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct LlmResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Production `Oracle` implementation over the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl Oracle for LlmClient {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, OracleError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse a structured error message
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(OracleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        llm_response
            .text()
            .map(str::to_owned)
            .ok_or(OracleError::EmptyContent)
    }
}

#[derive(Debug, Error)]
pub enum JsonExtractError {
    #[error("unterminated ```json fence in model output")]
    UnterminatedFence,

    #[error("invalid JSON in model output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model output is not a JSON object")]
    NotAnObject,
}

/// Extracts a JSON object from loosely-formatted model output.
///
/// Policy: if the response contains a ```json fence anywhere, parse the fence
/// interior; otherwise parse the whole trimmed response. Malformed JSON, a
/// missing closing fence, or a non-object top level are all surfaced as
/// errors — this function never guesses or repairs. Recovery belongs to the
/// calling stage's fallback.
pub fn extract_json(text: &str) -> Result<serde_json::Value, JsonExtractError> {
    let trimmed = text.trim();
    let candidate = match trimmed.find("```json") {
        Some(start) => {
            let interior = &trimmed[start + "```json".len()..];
            let end = interior
                .find("```")
                .ok_or(JsonExtractError::UnterminatedFence)?;
            interior[..end].trim()
        }
        None => trimmed,
    };

    let value: serde_json::Value = serde_json::from_str(candidate)?;
    if !value.is_object() {
        return Err(JsonExtractError::NotAnObject);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_fenced_block() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        let value = extract_json(input).unwrap();
        assert_eq!(value["key"], "value");
    }

    #[test]
    fn test_extract_json_fence_mid_response() {
        let input = "Sure! Here is the analysis:\n```json\n{\"ok\": true}\n```\nLet me know.";
        let value = extract_json(input).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_extract_json_without_fence() {
        let input = "  {\"key\": \"value\"}  ";
        let value = extract_json(input).unwrap();
        assert_eq!(value["key"], "value");
    }

    #[test]
    fn test_extract_json_unterminated_fence_is_error() {
        let input = "```json\n{\"key\": \"value\"}";
        assert!(matches!(
            extract_json(input),
            Err(JsonExtractError::UnterminatedFence)
        ));
    }

    #[test]
    fn test_extract_json_malformed_is_error() {
        assert!(matches!(
            extract_json("not json at all"),
            Err(JsonExtractError::Json(_))
        ));
    }

    #[test]
    fn test_extract_json_non_object_top_level_is_error() {
        assert!(matches!(
            extract_json("[1, 2, 3]"),
            Err(JsonExtractError::NotAnObject)
        ));
    }
}
