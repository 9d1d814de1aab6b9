//! Error types for courtside

use serde::Serialize;
use thiserror::Error;

/// Result type alias using CourtsideError
pub type Result<T> = std::result::Result<T, CourtsideError>;

/// Error type alias for convenience
pub type Error = CourtsideError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
    pub const UPSTREAM_UNAVAILABLE: i32 = 4;
}

/// Main error type for courtside
#[derive(Debug, Error)]
pub enum CourtsideError {
    /// The language model returned output that cannot be used
    #[error("Could not understand the model output: {0}")]
    IntentParse(String),

    /// The LLM service or stats provider could not be reached or failed
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A player or team (or data for it) could not be resolved
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Coarse classification surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    IntentParse,
    UpstreamUnavailable,
    NotFound,
    InvalidInput,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntentParse => "intent_parse",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::Internal => "internal",
        }
    }
}

impl CourtsideError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IntentParse(_) => ErrorKind::IntentParse,
            Self::UpstreamUnavailable(_) | Self::Http(_) => ErrorKind::UpstreamUnavailable,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            _ => ErrorKind::Internal,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::NotFound => exit_codes::NOT_FOUND,
            ErrorKind::InvalidInput => exit_codes::INVALID_INPUT,
            ErrorKind::UpstreamUnavailable => exit_codes::UPSTREAM_UNAVAILABLE,
            _ if matches!(self, Self::Config(_)) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }

    pub(crate) fn upstream(service: &str, err: impl std::fmt::Display) -> Self {
        Self::UpstreamUnavailable(format!("{}: {}", service, err))
    }
}
