//! Shared request state

use courtside_core::{ChatPipeline, HttpLLMClient, MetricsSnapshot, StatsFetcher};
use std::sync::Arc;

/// Immutable state cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ChatPipeline>,
    llm: Option<Arc<HttpLLMClient>>,
}

impl AppState {
    pub fn new(pipeline: ChatPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            llm: None,
        }
    }

    /// Report request counters of the HTTP LLM client on `/health`
    pub fn with_llm_metrics(mut self, llm: Arc<HttpLLMClient>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn pipeline(&self) -> &ChatPipeline {
        &self.pipeline
    }

    pub fn fetcher(&self) -> &StatsFetcher {
        self.pipeline.fetcher()
    }

    pub fn llm_metrics(&self) -> Option<MetricsSnapshot> {
        self.llm.as_ref().map(|client| client.metrics())
    }
}
