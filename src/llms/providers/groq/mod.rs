//! Groq streaming completion provider.
//!
//! Direct integration with the Groq chat completions API (OpenAI-compatible)
//! via `reqwest`. Responses stream back as Server-Sent Events: one
//! `data: {json}` line per token delta, terminated by `data: [DONE]`.
//!
//! The provider converts the wire stream into [`StreamChunk`] values pushed
//! through a channel-backed receiver. Mid-stream failures become an in-band
//! `Error` chunk; the request itself is never retried.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::Value;

use crate::config::Settings;
use crate::llms::streaming::{
    ChannelStreamReceiver, StreamChunk, StreamReceiver, StreamingLLM,
};
use crate::utilities::errors::GenerationError;

/// Default Groq API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Groq streaming completion client.
///
/// One instance is shared across sessions; each call opens an independent
/// streaming request.
#[derive(Debug, Clone)]
pub struct GroqCompletion {
    /// Model name (e.g. "llama3-8b-8192").
    model: String,
    /// Bearer token for the Groq API.
    api_key: String,
    /// API base URL, without the `/chat/completions` suffix.
    base_url: String,
    /// Output-length ceiling for every request.
    max_tokens: u32,
    client: reqwest::Client,
}

impl GroqCompletion {
    /// Create a new Groq completion provider.
    ///
    /// # Arguments
    ///
    /// * `model` - Groq model name.
    /// * `api_key` - API key (required; validated at config load).
    /// * `base_url` - Optional custom base URL.
    /// * `max_tokens` - Output-length ceiling applied to every request.
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: Option<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_tokens,
            client: reqwest::Client::new(),
        }
    }

    /// Build a provider from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.model.clone(),
            settings.api_key.clone(),
            Some(settings.base_url.clone()),
            settings.max_completion_tokens,
        )
    }

    /// Streaming chat completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Build the request body for a streaming completion.
    pub fn build_request_body(&self, system_prompt: &str, user_message: &str) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_message },
            ],
            "max_tokens": self.max_tokens,
            "stream": true,
        })
    }
}

#[async_trait]
impl StreamingLLM for GroqCompletion {
    async fn stream(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Box<dyn StreamReceiver>, GenerationError> {
        let body = self.build_request_body(system_prompt, user_message);

        log::debug!(
            "GroqCompletion.stream: model={}, max_tokens={}",
            self.model,
            self.max_tokens,
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let (tx, rx) = ChannelStreamReceiver::pair(64);

        tokio::spawn(async move {
            let mut byte_stream = response.bytes_stream();
            let mut line_buf = String::new();
            let mut content = String::new();

            while let Some(next) = byte_stream.next().await {
                let bytes = match next {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        let _ = tx
                            .send(StreamChunk::Error {
                                message: format!("stream read failed: {e}"),
                            })
                            .await;
                        return;
                    }
                };

                line_buf.push_str(&String::from_utf8_lossy(&bytes));

                // SSE events are newline-delimited; a chunk may carry a
                // partial line, so only complete lines are consumed.
                while let Some(pos) = line_buf.find('\n') {
                    let line: String = line_buf.drain(..=pos).collect();

                    let Some(data) = parse_sse_data(&line) else {
                        continue;
                    };

                    if data == "[DONE]" {
                        let content = std::mem::take(&mut content);
                        let _ = tx.send(StreamChunk::Done { content }).await;
                        return;
                    }

                    let event: Value = match serde_json::from_str(&data) {
                        Ok(json) => json,
                        Err(e) => {
                            let _ = tx
                                .send(StreamChunk::Error {
                                    message: format!("SSE parse error: {e}, data: {data}"),
                                })
                                .await;
                            return;
                        }
                    };

                    if let Some(message) = api_error_message(&event) {
                        let _ = tx.send(StreamChunk::Error { message }).await;
                        return;
                    }

                    if let Some(delta) = delta_text(&event) {
                        if !delta.is_empty() {
                            content.push_str(delta);
                            let chunk = StreamChunk::TextDelta {
                                text: delta.to_owned(),
                            };
                            if tx.send(chunk).await.is_err() {
                                // Receiver dropped; abandon the stream.
                                return;
                            }
                        }
                    }

                    if finish_reason(&event) == Some("stop") {
                        let content = std::mem::take(&mut content);
                        let _ = tx.send(StreamChunk::Done { content }).await;
                        return;
                    }
                }
            }

            // Connection closed without a terminator.
            let _ = tx
                .send(StreamChunk::Error {
                    message: "stream closed before [DONE]".to_string(),
                })
                .await;
        });

        Ok(Box::new(rx))
    }
}

// ---------------------------------------------------------------------------
// SSE helpers
// ---------------------------------------------------------------------------

/// Extract the payload of a `data:` SSE line, or `None` for blank lines,
/// comments, and other fields.
fn parse_sse_data(line: &str) -> Option<String> {
    let line = line.trim_end_matches(['\n', '\r']);
    let data = line.strip_prefix("data:")?;
    let data = data.strip_prefix(' ').unwrap_or(data);
    if data.is_empty() {
        return None;
    }
    Some(data.to_string())
}

/// Extract the text delta from a chat completion chunk, if present.
fn delta_text(event: &Value) -> Option<&str> {
    event["choices"][0]["delta"]["content"].as_str()
}

/// Extract the finish reason from a chat completion chunk, if present.
fn finish_reason(event: &Value) -> Option<&str> {
    event["choices"][0]["finish_reason"].as_str()
}

/// Extract an in-band API error payload, handling both object and string
/// error shapes.
fn api_error_message(event: &Value) -> Option<String> {
    let error = event.get("error")?;
    if let Some(message) = error.get("message").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }
    if let Some(message) = error.as_str() {
        return Some(message.to_string());
    }
    Some("backend error during streaming".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GroqCompletion {
        GroqCompletion::new("llama3-8b-8192", "gsk_test", None, 500)
    }

    #[test]
    fn request_body_is_streaming_and_bounded() {
        let body = provider().build_request_body("be kind", "hello");
        assert_eq!(body["model"], "llama3-8b-8192");
        assert_eq!(body["stream"], true);
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be kind");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
    }

    #[test]
    fn endpoint_joins_cleanly() {
        assert_eq!(
            provider().endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        let custom = GroqCompletion::new("m", "k", Some("http://localhost:9999/v1/".into()), 10);
        assert_eq!(custom.endpoint(), "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn sse_data_line_parsing() {
        assert_eq!(parse_sse_data("data: {\"a\":1}\n").as_deref(), Some("{\"a\":1}"));
        assert_eq!(parse_sse_data("data: [DONE]\r\n").as_deref(), Some("[DONE]"));
        assert_eq!(parse_sse_data("\n"), None);
        assert_eq!(parse_sse_data(": keepalive\n"), None);
        assert_eq!(parse_sse_data("event: ping\n"), None);
    }

    #[test]
    fn delta_extraction() {
        let event = serde_json::json!({
            "choices": [{ "delta": { "content": "hey " }, "finish_reason": null }]
        });
        assert_eq!(delta_text(&event), Some("hey "));
        assert_eq!(finish_reason(&event), None);

        let last = serde_json::json!({
            "choices": [{ "delta": {}, "finish_reason": "stop" }]
        });
        assert_eq!(delta_text(&last), None);
        assert_eq!(finish_reason(&last), Some("stop"));
    }

    #[test]
    fn error_payload_shapes() {
        let object_shape = serde_json::json!({ "error": { "message": "over capacity" } });
        assert_eq!(api_error_message(&object_shape).as_deref(), Some("over capacity"));

        let string_shape = serde_json::json!({ "error": "bad key" });
        assert_eq!(api_error_message(&string_shape).as_deref(), Some("bad key"));

        let clean = serde_json::json!({ "choices": [] });
        assert!(api_error_message(&clean).is_none());
    }
}
