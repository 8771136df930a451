//! Gemini Provider - Implementation of AIProvider for Google's Gemini API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-flash")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! # Streaming
//!
//! `streamGenerateContent?alt=sse` answers with Server-Sent Events whose
//! `data:` lines each hold a partial `GenerateContentResponse`. The last one
//! carries `finishReason` and `usageMetadata`.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, ChunkStream, CompletionRequest, CompletionResponse, FinishReason,
    MessageRole, ProviderInfo, StreamChunk, TokenUsage,
};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-1.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures (non-streaming only).
    pub max_retries: u32,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 1,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Google Gemini provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new provider, building an HTTP client with the configured timeout.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|msg| GeminiContent {
                role: Some(
                    match msg.role {
                        MessageRole::User => "user",
                        MessageRole::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![GeminiPart {
                    text: Some(msg.content.clone()),
                }],
            })
            .collect();

        let system_instruction = request.system_prompt.as_ref().map(|prompt| GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: Some(prompt.clone()),
            }],
        });

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }

    async fn post(&self, url: String, request: &CompletionRequest) -> Result<Response, AIError> {
        let body = Self::to_gemini_request(request);

        tracing::debug!(
            model = %self.config.model,
            trace_id = %request.metadata.trace_id,
            "Sending Gemini request"
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })?;

        Self::handle_response_status(response).await
    }

    /// Maps non-success HTTP statuses onto `AIError`.
    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(Self::parse_retry_after(&error_body))),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Reads `retryDelay` (e.g. `"17s"`) out of a Gemini error body.
    fn parse_retry_after(error_body: &str) -> u32 {
        let parsed: serde_json::Value = match serde_json::from_str(error_body) {
            Ok(value) => value,
            Err(_) => return 30,
        };

        parsed
            .pointer("/error/details")
            .and_then(|details| details.as_array())
            .into_iter()
            .flatten()
            .filter_map(|detail| detail.get("retryDelay").and_then(|d| d.as_str()))
            .find_map(|delay| delay.trim_end_matches('s').parse::<f32>().ok())
            .map(|secs| secs.ceil() as u32)
            .unwrap_or(30)
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        let candidate = gemini_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("Response contained no candidates"))?;

        Ok(CompletionResponse {
            content: candidate.text(),
            usage: gemini_response
                .usage_metadata
                .map(UsageMetadata::into_usage)
                .unwrap_or_default(),
            model: gemini_response
                .model_version
                .unwrap_or_else(|| self.config.model.clone()),
            finish_reason: map_finish_reason(candidate.finish_reason.as_deref()),
        })
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            let attempt = match self.post(self.generate_url(), &request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match attempt {
                Ok(completion) => return Ok(completion),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err)
                }
                Err(err) => {
                    tracing::warn!(error = %err, retry = retry_count + 1, "Retrying Gemini request");
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            sleep(Duration::from_secs(1 << retry_count)).await;
            retry_count += 1;
        }
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<ChunkStream, AIError> {
        let response = self.post(self.stream_url(), &request).await?;

        let stream = response
            .bytes_stream()
            .scan(SseLineBuffer::default(), |pending, chunk_result| {
                let items = match chunk_result {
                    Ok(bytes) => pending
                        .push(&bytes)
                        .map(|complete| parse_gemini_sse(&complete))
                        .unwrap_or_default(),
                    Err(e) => vec![Err(AIError::network(format!("Stream error: {}", e)))],
                };
                futures::future::ready(Some(items))
            })
            .flat_map(stream::iter);

        Ok(Box::pin(stream))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model).with_streaming(true)
    }
}

/// Carries the unfinished tail of an SSE body between network chunks.
///
/// Bytes are only decoded up to the last newline, so a multi-byte character
/// split across two reads is decoded whole.
#[derive(Debug, Default)]
struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    /// Appends `bytes` and returns every complete line received so far.
    fn push(&mut self, bytes: &[u8]) -> Option<String> {
        self.pending.extend_from_slice(bytes);
        let end = self.pending.iter().rposition(|b| *b == b'\n')?;
        let complete: Vec<u8> = self.pending.drain(..=end).collect();
        Some(String::from_utf8_lossy(&complete).into_owned())
    }
}

fn map_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
            FinishReason::ContentFilter
        }
        _ => FinishReason::Stop,
    }
}

/// Parses complete SSE lines into StreamChunks.
///
/// ```text
/// data: {"candidates":[{"content":{"parts":[{"text":"Hello"}]}}]}
/// ```
fn parse_gemini_sse(text: &str) -> Vec<Result<StreamChunk, AIError>> {
    let mut results = Vec::new();

    for line in text.lines() {
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };

        let event: GeminiResponse = match serde_json::from_str(data.trim()) {
            Ok(event) => event,
            Err(e) => {
                results.push(Err(AIError::parse(format!("Bad stream event: {}", e))));
                continue;
            }
        };

        let usage = event.usage_metadata;
        for candidate in event.candidates {
            let delta = candidate.text();
            if !delta.is_empty() {
                results.push(Ok(StreamChunk::content(delta)));
            }
            if let Some(reason) = candidate.finish_reason.as_deref() {
                let usage = usage.clone().map(UsageMetadata::into_usage).unwrap_or_default();
                results.push(Ok(StreamChunk::final_chunk(
                    map_finish_reason(Some(reason)),
                    usage,
                )));
            }
        }
    }

    results
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

impl Candidate {
    fn text(&self) -> String {
        self.content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

impl UsageMetadata {
    fn into_usage(self) -> TokenUsage {
        TokenUsage::new(self.prompt_token_count, self.candidates_token_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("test-key")
            .with_model("gemini-1.5-pro")
            .with_base_url("https://custom.api.com/")
            .with_timeout(Duration::from_secs(10))
            .with_max_retries(3);

        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn urls_target_the_configured_model() {
        let provider = GeminiProvider::new(
            GeminiConfig::new("k").with_base_url("https://custom.api.com/"),
        )
        .unwrap();

        assert_eq!(
            provider.generate_url(),
            "https://custom.api.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(
            provider.stream_url(),
            "https://custom.api.com/v1beta/models/gemini-1.5-flash:streamGenerateContent?alt=sse"
        );
    }

    #[test]
    fn request_maps_roles_and_system_prompt() {
        let request = CompletionRequest::new(RequestMetadata::new("t"))
            .with_system_prompt("You are support")
            .with_message(MessageRole::User, "hi")
            .with_message(MessageRole::Assistant, "hello")
            .with_temperature(0.1)
            .with_max_tokens(5);

        let json = serde_json::to_value(GeminiProvider::to_gemini_request(&request)).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][1]["parts"][0]["text"], "hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "You are support");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 5);
    }

    #[test]
    fn request_without_options_omits_them() {
        let request =
            CompletionRequest::new(RequestMetadata::new("t")).with_message(MessageRole::User, "q");

        let json = serde_json::to_value(GeminiProvider::to_gemini_request(&request)).unwrap();

        assert!(json.get("systemInstruction").is_none());
        assert!(json["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn provider_info_reports_gemini() {
        let provider = GeminiProvider::new(GeminiConfig::new("k")).unwrap();
        let info = provider.provider_info();
        assert_eq!(info.name, "gemini");
        assert_eq!(info.model, "gemini-1.5-flash");
        assert!(info.supports_streaming);
    }

    #[test]
    fn parse_sse_content_delta() {
        let data = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Hello\"}],\"role\":\"model\"}}]}\n";
        let chunks = parse_gemini_sse(data);

        assert_eq!(chunks.len(), 1);
        let chunk = chunks[0].as_ref().unwrap();
        assert_eq!(chunk.delta, "Hello");
        assert!(!chunk.is_final());
    }

    #[test]
    fn parse_sse_final_event_emits_text_then_final() {
        let data = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\" there\"}]},\"finishReason\":\"STOP\"}],\"usageMetadata\":{\"promptTokenCount\":7,\"candidatesTokenCount\":3}}\n";
        let chunks = parse_gemini_sse(data);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].as_ref().unwrap().delta, " there");
        let last = chunks[1].as_ref().unwrap();
        assert!(last.is_final());
        assert_eq!(last.finish_reason, Some(FinishReason::Stop));
        assert_eq!(last.usage.as_ref().unwrap().total_tokens, 10);
    }

    #[test]
    fn parse_sse_skips_blank_and_non_data_lines() {
        let data = "\n: keepalive\ndata: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"a\"}]}}]}\n\ndata: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"b\"}]}}]}\n";
        let deltas: Vec<String> = parse_gemini_sse(data)
            .into_iter()
            .map(|c| c.unwrap().delta)
            .collect();

        assert_eq!(deltas, vec!["a", "b"]);
    }

    #[test]
    fn parse_sse_reports_malformed_event() {
        let chunks = parse_gemini_sse("data: {not json}\n");
        assert!(matches!(chunks[0], Err(AIError::Parse(_))));
    }

    #[test]
    fn line_buffer_holds_partial_lines() {
        let mut buffer = SseLineBuffer::default();

        assert!(buffer.push(b"data: {\"a\"").is_none());
        assert_eq!(buffer.push(b":1}\ndata: ").as_deref(), Some("data: {\"a\":1}\n"));
        assert_eq!(buffer.push(b"x\n").as_deref(), Some("data: x\n"));
    }

    #[test]
    fn emoji_split_across_reads_survives() {
        let line = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Hi \u{1F3AB} there\"}]}}]}\n";
        let bytes = line.as_bytes();
        let emoji_at = line.find('\u{1F3AB}').unwrap();
        let (first, second) = bytes.split_at(emoji_at + 2);

        let mut buffer = SseLineBuffer::default();
        assert!(buffer.push(first).is_none());
        let complete = buffer.push(second).unwrap();

        let chunks = parse_gemini_sse(&complete);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].as_ref().unwrap().delta, "Hi \u{1F3AB} there");
    }

    #[test]
    fn finish_reason_mapping() {
        assert_eq!(map_finish_reason(Some("MAX_TOKENS")), FinishReason::Length);
        assert_eq!(map_finish_reason(Some("SAFETY")), FinishReason::ContentFilter);
        assert_eq!(map_finish_reason(None), FinishReason::Stop);
    }

    #[test]
    fn parse_retry_after_reads_retry_delay() {
        let body = r#"{"error":{"code":429,"details":[{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"17s"}]}}"#;
        assert_eq!(GeminiProvider::parse_retry_after(body), 17);
    }

    #[test]
    fn parse_retry_after_default() {
        assert_eq!(GeminiProvider::parse_retry_after("quota exceeded"), 30);
    }
}
