//! HTTP client for external LLM services (vLLM, OpenAI, etc.)

use crate::config::LLMServiceConfig;
use crate::error::{CourtsideError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Trait for LLM service clients
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate chat completion
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Sampling options for a single completion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionOptions {
    /// Deterministic sampling with the given token budget
    pub fn deterministic(max_tokens: u32) -> Self {
        Self {
            temperature: 0.0,
            max_tokens,
        }
    }
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self::deterministic(512)
    }
}

/// API metrics for monitoring
#[derive(Debug, Default)]
pub struct APIMetrics {
    pub total_requests: AtomicU64,
    pub total_errors: AtomicU64,
    /// Summed over every request, failed ones included
    pub total_latency_ms: AtomicU64,
}

/// Snapshot of API metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    pub avg_latency_ms: f64,
}

/// OpenAI-compatible chat completions client
pub struct HttpLLMClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
    metrics: Arc<APIMetrics>,
}

impl HttpLLMClient {
    /// Create new client from configuration
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CourtsideError::Http)?;

        Ok(Self {
            http_client,
            config,
            metrics: Arc::new(APIMetrics::default()),
        })
    }

    /// Get current API metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        let total = self.metrics.total_requests.load(Ordering::Relaxed);

        MetricsSnapshot {
            total_requests: total,
            total_errors: self.metrics.total_errors.load(Ordering::Relaxed),
            avg_latency_ms: if total > 0 {
                self.metrics.total_latency_ms.load(Ordering::Relaxed) as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    async fn send_chat(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct ChatRequest {
            model: String,
            messages: Vec<ChatMessage>,
            temperature: f32,
            max_tokens: u32,
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let url = format!(
            "{}/v1/chat/completions",
            self.config.url.trim_end_matches('/')
        );
        tracing::debug!("Calling LLM service at {}", url);

        let mut req = self.http_client.post(&url).json(&request);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req
            .send()
            .await
            .map_err(|e| CourtsideError::upstream("LLM service", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CourtsideError::UpstreamUnavailable(format!(
                "LLM service error (HTTP {}): {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CourtsideError::upstream("LLM service", e))?;
        reply_content(&body)
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Text of the first choice in a chat completions body
///
/// A body that is not a completion is an upstream fault; a completion
/// without text is unusable model output.
fn reply_content(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CourtsideError::upstream("LLM service returned an unreadable body", e))?;

    parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CourtsideError::IntentParse("No response from LLM".to_string()))?
        .message
        .content
        .ok_or_else(|| CourtsideError::IntentParse("LLM reply has no content".to_string()))
}

#[async_trait]
impl LLMClient for HttpLLMClient {
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String> {
        let start = Instant::now();
        self.metrics.total_requests.fetch_add(1, Ordering::Relaxed);

        let result = self.send_chat(messages, options).await;

        let elapsed = start.elapsed().as_millis() as u64;
        self.metrics
            .total_latency_ms
            .fetch_add(elapsed, Ordering::Relaxed);
        if result.is_err() {
            self.metrics.total_errors.fetch_add(1, Ordering::Relaxed);
        }

        result
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Extract the JSON object embedded in a model reply
///
/// Accepts bare JSON, JSON inside markdown fences, or JSON surrounded by
/// prose (first `{` to last `}`).
pub fn extract_json_object(response: &str) -> Option<serde_json::Value> {
    let trimmed = response.trim();
    if let Ok(value @ serde_json::Value::Object(_)) =
        serde_json::from_str::<serde_json::Value>(trimmed)
    {
        return Some(value);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(&trimmed[start..=end]) {
        Ok(value @ serde_json::Value::Object(_)) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_content() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "OKC went 57-25."}}]}"#;
        assert_eq!(reply_content(body).unwrap(), "OKC went 57-25.");
    }

    #[test]
    fn test_null_content_is_unusable_output() {
        for body in [
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
            r#"{"choices": [{"message": {"role": "assistant"}}]}"#,
            r#"{"choices": []}"#,
        ] {
            let err = reply_content(body).unwrap_err();
            assert!(matches!(err, CourtsideError::IntentParse(_)), "{}", body);
        }
    }

    #[test]
    fn test_unreadable_body_is_upstream_fault() {
        let err = reply_content("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, CourtsideError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_failed_calls_count_in_metrics() {
        let client = HttpLLMClient::new(LLMServiceConfig {
            url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..LLMServiceConfig::default()
        })
        .unwrap();

        let err = client
            .chat_completion(vec![ChatMessage::user("hi")], CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CourtsideError::UpstreamUnavailable(_)));

        let metrics = client.metrics();
        assert_eq!(metrics.total_requests, 1);
        assert_eq!(metrics.total_errors, 1);
        assert!(metrics.avg_latency_ms >= 0.0);
    }

    #[test]
    fn test_extract_bare_json() {
        let value = extract_json_object(r#"{"intent": "standings"}"#).unwrap();
        assert_eq!(value["intent"], "standings");
    }

    #[test]
    fn test_extract_fenced_json() {
        let reply = "Sure! Here it is:\n```json\n{\"intent\": \"games\", \"season\": null}\n```";
        let value = extract_json_object(reply).unwrap();
        assert_eq!(value["intent"], "games");
        assert!(value["season"].is_null());
    }

    #[test]
    fn test_extract_rejects_garbage() {
        assert!(extract_json_object("I don't know").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(extract_json_object("{not json at all}").is_none());
        assert!(extract_json_object("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_metrics_start_empty() {
        let client = HttpLLMClient::new(LLMServiceConfig {
            url: "http://localhost:1".to_string(),
            model: "test".to_string(),
            api_key: None,
            timeout_secs: 1,
        })
        .unwrap();

        let metrics = client.metrics();
        assert_eq!(metrics.total_requests, 0);
        assert_eq!(metrics.avg_latency_ms, 0.0);
        assert_eq!(client.model_name(), "test");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_upstream_error() {
        let client = HttpLLMClient::new(LLMServiceConfig {
            url: "http://127.0.0.1:1".to_string(),
            model: "test".to_string(),
            api_key: None,
            timeout_secs: 2,
        })
        .unwrap();

        let err = client
            .chat_completion(vec![ChatMessage::user("hi")], CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CourtsideError::UpstreamUnavailable(_)));
        assert_eq!(client.metrics().total_errors, 1);
    }
}
