//! Fakes shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use courtside_core::{
    ChatMessage, CompletionOptions, CourtsideError, LLMClient, Params, Result,
    StatsProviderConfig, StatsProvider,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

type Handler = Box<dyn Fn(&str, &Params) -> Result<Value> + Send + Sync>;

/// Stats provider answering from a closure and recording every call
pub struct FakeProvider {
    handler: Handler,
    calls: Mutex<Vec<(String, Params)>>,
}

impl FakeProvider {
    pub fn new(
        handler: impl Fn(&str, &Params) -> Result<Value> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<Params> {
        self.calls()
            .into_iter()
            .filter(|(p, _)| p == path)
            .map(|(_, params)| params)
            .collect()
    }
}

#[async_trait]
impl StatsProvider for FakeProvider {
    async fn get(&self, path: &str, params: &Params) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), params.clone()));
        (self.handler)(path, params)
    }
}

/// Value of a query parameter
pub fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
}

/// LLM client replaying scripted replies in order
pub struct ScriptedLLM {
    replies: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedLLM {
    pub fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(replies: &[&str]) -> Arc<Self> {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    /// User message of every call made so far
    pub fn user_prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter_map(|messages| messages.last().map(|m| m.content.clone()))
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMClient for ScriptedLLM {
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        _options: CompletionOptions,
    ) -> Result<String> {
        self.prompts.lock().unwrap().push(messages);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CourtsideError::IntentParse("no scripted reply".to_string())))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

pub fn stats_config() -> StatsProviderConfig {
    StatsProviderConfig {
        url: "http://stats.invalid".to_string(),
        api_key: Some("test-key".to_string()),
        api_host: "stats.invalid".to_string(),
        league_id: 12,
        default_season: Some("2023-2024".to_string()),
        timeout_secs: 1,
    }
}

pub fn standings_payload() -> Value {
    serde_json::json!([
        [
            {
                "position": 1,
                "group": {"name": "Western Conference"},
                "team": {"id": 152, "name": "Oklahoma City Thunder"},
                "games": {"played": 82, "win": {"total": 57, "percentage": "0.695"}, "lose": {"total": 25}}
            },
            {
                "position": 2,
                "group": {"name": "Western Conference"},
                "team": {"id": 139, "name": "Denver Nuggets"},
                "games": {"played": 82, "win": {"total": 57, "percentage": "0.695"}, "lose": {"total": 25}}
            }
        ],
        [
            {
                "position": 1,
                "group": {"name": "Eastern Conference"},
                "team": {"id": 133, "name": "Boston Celtics"},
                "games": {"played": 82, "win": {"total": 64, "percentage": "0.780"}, "lose": {"total": 18}}
            }
        ]
    ])
}

pub fn thunder_roster() -> Value {
    serde_json::json!([
        {"id": 1, "name": "Gilgeous-Alexander Shai", "number": "2", "country": "Canada", "position": "Guard"},
        {"id": 2, "name": "Holmgren Chet", "number": "7", "country": "USA", "position": "Center"},
        {"id": 3, "name": "Williams Jalen", "number": "8", "country": "USA", "position": "Forward"}
    ])
}
