//! LLM integration
//!
//! Provides:
//! - An OpenAI-compatible chat completions client
//! - Intent resolution (question to category and entities)
//! - Answer composition from fetched statistics

mod client;
mod intent;
mod intent_resolver;
mod response_composer;

pub use client::{
    extract_json_object, ChatMessage, CompletionOptions, HttpLLMClient, LLMClient,
    MetricsSnapshot,
};
pub use intent::{Category, Entities, Intent};
pub use intent_resolver::{parse_intent_response, IntentResolver};
pub use response_composer::{build_context, ResponseComposer, MAX_CONTEXT_CHARS};
