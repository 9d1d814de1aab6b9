//! Courtside Core Library
//!
//! Answers natural-language basketball questions.
//!
//! # Features
//! - LLM intent resolution into a category and named entities
//! - Team/player resolution and stats retrieval from the api-sports basketball API
//! - Normalization of provider payloads into flat records
//! - LLM answer composition grounded in the fetched record

pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod stats;

pub use config::{Config, LLMServiceConfig, ServerConfig, StatsProviderConfig};
pub use error::{exit_codes, CourtsideError, Error, ErrorKind, Result};
pub use llm::{
    Category, ChatMessage, CompletionOptions, Entities, HttpLLMClient, Intent, IntentResolver,
    LLMClient, MetricsSnapshot, ResponseComposer,
};
pub use pipeline::{ChatDebug, ChatPipeline, ChatReply};
pub use stats::{
    Endpoint, HttpStatsProvider, Params, StatRecord, StatsFetcher, StatsProvider,
};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "courtside";
