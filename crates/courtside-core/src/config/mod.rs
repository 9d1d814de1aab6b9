//! Configuration management

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM service configuration
    #[serde(default)]
    pub llm_service: LLMServiceConfig,

    /// Basketball statistics provider configuration
    #[serde(default)]
    pub stats_provider: StatsProviderConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Base URL of the OpenAI-compatible chat completions service
    pub url: String,

    /// Model name for chat completions
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("COURTSIDE_LLM_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            model: default_chat_model(),
            api_key: std::env::var("COURTSIDE_LLM_API_KEY").ok(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

fn default_chat_model() -> String {
    std::env::var("COURTSIDE_LLM_MODEL")
        .unwrap_or_else(|_| "meta-llama/Llama-3.1-8B-Instruct".to_string())
}

fn default_llm_timeout() -> u64 {
    30
}

/// Stats provider configuration (api-sports basketball v1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsProviderConfig {
    /// Base URL of the provider
    #[serde(default = "default_stats_url")]
    pub url: String,

    /// API key sent as `x-rapidapi-key`
    #[serde(default = "default_stats_api_key")]
    pub api_key: Option<String>,

    /// Value of the `x-rapidapi-host` header
    #[serde(default = "default_stats_host")]
    pub api_host: String,

    /// Provider league id for the NBA
    #[serde(default = "default_league_id")]
    pub league_id: u32,

    /// Season used when a query names none (falls back to the current season)
    #[serde(default = "default_season")]
    pub default_season: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_stats_timeout")]
    pub timeout_secs: u64,
}

impl Default for StatsProviderConfig {
    fn default() -> Self {
        Self {
            url: default_stats_url(),
            api_key: default_stats_api_key(),
            api_host: default_stats_host(),
            league_id: default_league_id(),
            default_season: default_season(),
            timeout_secs: default_stats_timeout(),
        }
    }
}

fn default_stats_url() -> String {
    std::env::var("COURTSIDE_STATS_URL")
        .unwrap_or_else(|_| "https://v1.basketball.api-sports.io".to_string())
}

fn default_stats_api_key() -> Option<String> {
    std::env::var("COURTSIDE_STATS_API_KEY")
        .or_else(|_| std::env::var("RAPIDAPI_KEY"))
        .ok()
}

fn default_stats_host() -> String {
    "v1.basketball.api-sports.io".to_string()
}

fn default_league_id() -> u32 {
    12
}

fn default_season() -> Option<String> {
    std::env::var("COURTSIDE_DEFAULT_SEASON").ok()
}

fn default_stats_timeout() -> u64 {
    15
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    std::env::var("COURTSIDE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
}

fn default_port() -> u16 {
    std::env::var("COURTSIDE_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080)
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load config from a path, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get default config path (`COURTSIDE_CONFIG` overrides it)
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("COURTSIDE_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Copy of this config with API keys masked, for display
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.llm_service.api_key = config.llm_service.api_key.map(|_| "***".to_string());
        config.stats_provider.api_key =
            config.stats_provider.api_key.map(|_| "***".to_string());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.yml")).unwrap();
        assert_eq!(config.stats_provider.league_id, 12);
        assert_eq!(config.stats_provider.api_host, "v1.basketball.api-sports.io");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "llm_service:\n  url: http://llm.local:9000\n  model: test-model\nserver:\n  port: 9999\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.llm_service.url, "http://llm.local:9000");
        assert_eq!(config.llm_service.model, "test-model");
        assert_eq!(config.llm_service.timeout_secs, 30);
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.stats_provider.timeout_secs, 15);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "server: [not, a, map").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_redacted_masks_keys() {
        let mut config = Config::default();
        config.llm_service.api_key = Some("sk-secret".to_string());
        config.stats_provider.api_key = Some("rapid-secret".to_string());

        let redacted = config.redacted();
        assert_eq!(redacted.llm_service.api_key.as_deref(), Some("***"));
        assert_eq!(redacted.stats_provider.api_key.as_deref(), Some("***"));
        assert_eq!(config.llm_service.api_key.as_deref(), Some("sk-secret"));
    }
}
