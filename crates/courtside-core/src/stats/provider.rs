//! HTTP client for the basketball statistics provider (api-sports v1)

use crate::config::StatsProviderConfig;
use crate::error::{CourtsideError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Query parameters for a provider call
pub type Params = Vec<(&'static str, String)>;

/// Raw access to the statistics provider
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// GET `path` with `params` and return the `response` payload
    async fn get(&self, path: &str, params: &Params) -> Result<Value>;
}

/// api-sports basketball client
pub struct HttpStatsProvider {
    client: Client,
    base_url: String,
    api_key: String,
    api_host: String,
}

/// Remaining-quota threshold below which a warning is logged
const LOW_QUOTA_WARNING: i64 = 10;

impl HttpStatsProvider {
    /// Create from configuration; the API key is required
    pub fn new(config: &StatsProviderConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            CourtsideError::Config(
                "Missing stats provider API key. Set COURTSIDE_STATS_API_KEY or RAPIDAPI_KEY"
                    .to_string(),
            )
        })?;

        let client = Client::builder()
            .user_agent(concat!("courtside/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CourtsideError::Http)?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key,
            api_host: config.api_host.clone(),
        })
    }

    fn check_rate_limit(&self, response: &reqwest::Response) {
        let remaining = response
            .headers()
            .get("x-ratelimit-requests-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok());

        if let Some(remaining) = remaining {
            if remaining < LOW_QUOTA_WARNING {
                tracing::warn!(
                    "Stats provider quota low ({} requests remaining today)",
                    remaining
                );
            }
        }
    }
}

#[async_trait]
impl StatsProvider for HttpStatsProvider {
    async fn get(&self, path: &str, params: &Params) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::info!("Calling stats provider {} with {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CourtsideError::UpstreamUnavailable(format!(
                        "Stats provider timed out on {}",
                        path
                    ))
                } else if e.is_connect() {
                    CourtsideError::UpstreamUnavailable(format!(
                        "Cannot reach stats provider at {}",
                        self.base_url
                    ))
                } else {
                    CourtsideError::upstream("stats provider", e)
                }
            })?;

        self.check_rate_limit(&response);

        let status = response.status();
        tracing::debug!("Stats provider status: {}", status);
        if !status.is_success() {
            return Err(match status {
                StatusCode::NOT_FOUND => {
                    CourtsideError::NotFound(format!("Stats provider has no resource {}", path))
                }
                _ => CourtsideError::UpstreamUnavailable(format!(
                    "Stats provider returned HTTP {} for {}",
                    status.as_u16(),
                    path
                )),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CourtsideError::upstream("stats provider returned invalid JSON", e))?;

        unwrap_envelope(body)
    }
}

/// Extract `response` from the provider envelope
///
/// The provider reports failures such as bad keys or exhausted quota with
/// HTTP 200 and a non-empty `errors` field.
pub fn unwrap_envelope(mut body: Value) -> Result<Value> {
    let has_errors = match body.get("errors") {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    };

    if has_errors {
        return Err(CourtsideError::UpstreamUnavailable(format!(
            "Stats provider reported errors: {}",
            body["errors"]
        )));
    }

    Ok(body
        .get_mut("response")
        .map(Value::take)
        .unwrap_or(Value::Null))
}

/// True when a payload carries no data
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_returns_response() {
        let body = json!({"get": "teams", "errors": [], "results": 1, "response": [{"id": 145}]});
        assert_eq!(unwrap_envelope(body).unwrap(), json!([{"id": 145}]));
    }

    #[test]
    fn test_unwrap_envelope_reports_errors() {
        let body = json!({"errors": {"token": "Error/Missing application key."}, "response": []});
        let err = unwrap_envelope(body).unwrap_err();
        assert!(matches!(err, CourtsideError::UpstreamUnavailable(_)));
        assert!(err.to_string().contains("Missing application key"));
    }

    #[test]
    fn test_unwrap_envelope_missing_response_is_null() {
        assert_eq!(unwrap_envelope(json!({"errors": []})).unwrap(), Value::Null);
    }

    #[test]
    fn test_is_empty_payload() {
        assert!(is_empty_payload(&Value::Null));
        assert!(is_empty_payload(&json!([])));
        assert!(is_empty_payload(&json!({})));
        assert!(!is_empty_payload(&json!([1])));
        assert!(!is_empty_payload(&json!({"games": {}})));
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = StatsProviderConfig {
            api_key: None,
            ..StatsProviderConfig::default()
        };
        let err = HttpStatsProvider::new(&config).err().unwrap();
        assert!(matches!(err, CourtsideError::Config(_)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_upstream_error() {
        let config = StatsProviderConfig {
            url: "http://127.0.0.1:1".to_string(),
            api_key: Some("test".to_string()),
            timeout_secs: 2,
            ..StatsProviderConfig::default()
        };
        let provider = HttpStatsProvider::new(&config).unwrap();
        let err = provider.get("/standings", &vec![]).await.unwrap_err();
        assert!(matches!(err, CourtsideError::UpstreamUnavailable(_)));
    }
}
