//! Question answering: resolve, fetch, compose

use crate::config::Config;
use crate::error::Result;
use crate::llm::{
    Category, Entities, HttpLLMClient, Intent, IntentResolver, LLMClient, ResponseComposer,
};
use crate::stats::{Endpoint, StatRecord, StatsFetcher};
use serde::Serialize;
use std::sync::Arc;

/// Reply to one chat question
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub answer: String,
    pub intent: Category,
    pub debug: ChatDebug,
}

/// What fed the answer
#[derive(Debug, Clone, Serialize)]
pub struct ChatDebug {
    pub entities: Entities,
    pub record: Option<StatRecord>,
}

/// Sequential three-stage pipeline
pub struct ChatPipeline {
    resolver: IntentResolver,
    fetcher: Arc<StatsFetcher>,
    composer: ResponseComposer,
}

impl ChatPipeline {
    pub fn new(
        resolver: IntentResolver,
        fetcher: Arc<StatsFetcher>,
        composer: ResponseComposer,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            composer,
        }
    }

    /// Resolver and composer sharing one LLM client
    pub fn with_client(llm: Arc<dyn LLMClient>, fetcher: Arc<StatsFetcher>) -> Self {
        Self::new(
            IntentResolver::new(llm.clone()),
            fetcher,
            ResponseComposer::new(llm),
        )
    }

    /// Build the HTTP-backed pipeline from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let llm = Arc::new(HttpLLMClient::new(config.llm_service.clone())?);
        let fetcher = Arc::new(StatsFetcher::from_config(&config.stats_provider)?);
        Ok(Self::with_client(llm, fetcher))
    }

    pub fn fetcher(&self) -> &Arc<StatsFetcher> {
        &self.fetcher
    }

    /// Answer a question
    pub async fn answer(&self, query: &str) -> Result<ChatReply> {
        let intent = self.resolver.resolve(query).await?;

        let record = match Endpoint::for_intent(&intent) {
            Some(endpoint) => {
                let missing = endpoint.missing_entities(&intent.entities);
                if missing.is_empty() {
                    Some(self.fetcher.fetch_endpoint(endpoint, &intent.entities).await?)
                } else {
                    tracing::info!(
                        "Skipping {:?} lookup, missing {}",
                        endpoint,
                        missing.join(", ")
                    );
                    None
                }
            }
            None => None,
        };

        let answer = self
            .composer
            .compose(query, &intent, record.as_ref())
            .await?;

        let Intent { category, entities } = intent;
        Ok(ChatReply {
            answer,
            intent: category,
            debug: ChatDebug { entities, record },
        })
    }
}
