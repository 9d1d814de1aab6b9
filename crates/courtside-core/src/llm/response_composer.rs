//! Natural-language answers grounded in fetched statistics

use super::{ChatMessage, CompletionOptions, Intent, LLMClient};
use crate::error::{CourtsideError, Result};
use crate::stats::StatRecord;
use serde_json::{json, Value};
use std::sync::Arc;

/// Token budget for the answer
const ANSWER_MAX_TOKENS: u32 = 650;

/// Characters of serialized context passed to the model
pub const MAX_CONTEXT_CHARS: usize = 8000;

const NO_RECORD_NOTE: &str = "No stats lookup was made for this question.";

const ANSWER_SYSTEM_PROMPT: &str = r#"You are an NBA analytics assistant. You receive:
- The user's question,
- A high-level "intent" indicating what they asked for,
- Structured JSON data from a stats backend (if available).

Rules:

1. The backend JSON is the only source of numeric stats (points per game, rebounds, assists, shooting percentages, totals, records).
2. If the backend JSON is missing or lacks the requested data, do NOT state any specific numbers. Briefly say the stats could not be retrieved; a high-level qualitative remark is fine.
3. If the backend JSON looks valid, summarize the most relevant numbers in clear, conversational English.
4. Do not dump raw JSON or long game lists unless the user explicitly asks.
5. Be concise: 1-3 short paragraphs, plus bullet points if helpful."#;

/// Writes the final reply from the question, intent and record
pub struct ResponseComposer {
    client: Arc<dyn LLMClient>,
}

impl ResponseComposer {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Compose an answer. `record` is `None` for conversational questions.
    pub async fn compose(
        &self,
        query: &str,
        intent: &Intent,
        record: Option<&StatRecord>,
    ) -> Result<String> {
        let context = build_context(intent, record);
        let messages = vec![
            ChatMessage::system(ANSWER_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "User question:\n{}\n\nStructured context from backend (JSON):\n{}\n\n\
                 Now write the best possible answer for the user, using ONLY this data for numeric stats.",
                query.trim(),
                context
            )),
        ];

        let answer = self
            .client
            .chat_completion(messages, CompletionOptions::deterministic(ANSWER_MAX_TOKENS))
            .await?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(CourtsideError::IntentParse(
                "LLM returned an empty answer".to_string(),
            ));
        }
        Ok(answer.to_string())
    }
}

/// Serialized `{intent, entities, backend}` context, cut to
/// [`MAX_CONTEXT_CHARS`] characters
pub fn build_context(intent: &Intent, record: Option<&StatRecord>) -> String {
    let backend = match record {
        Some(record) => Value::Object(record.fields.clone()),
        None => json!({ "note": NO_RECORD_NOTE }),
    };
    let context = json!({
        "intent": intent.category,
        "entities": intent.entities.as_map(),
        "backend": backend,
    });

    let serialized = context.to_string();
    match serialized.char_indices().nth(MAX_CONTEXT_CHARS) {
        Some((cut, _)) => serialized[..cut].to_string(),
        None => serialized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Category;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingClient {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LLMClient for RecordingClient {
        async fn chat_completion(
            &self,
            messages: Vec<ChatMessage>,
            options: CompletionOptions,
        ) -> Result<String> {
            assert_eq!(options.max_tokens, ANSWER_MAX_TOKENS);
            assert_eq!(options.temperature, 0.0);
            let user = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            self.prompts.lock().unwrap().push(user);
            Ok(self.reply.clone())
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    fn composer(reply: &str) -> (ResponseComposer, Arc<RecordingClient>) {
        let client = Arc::new(RecordingClient {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        });
        (ResponseComposer::new(client.clone()), client)
    }

    #[test]
    fn test_context_includes_record_fields() {
        let intent = Intent::new(Category::Roster).with_team("Oklahoma City Thunder");
        let record = StatRecord::new(Category::Roster)
            .with("team", "Oklahoma City Thunder")
            .with("player_count", 2);

        let context: Value = serde_json::from_str(&build_context(&intent, Some(&record))).unwrap();
        assert_eq!(context["intent"], "roster");
        assert_eq!(context["entities"]["team"], "Oklahoma City Thunder");
        assert_eq!(context["backend"]["player_count"], 2);
    }

    #[test]
    fn test_context_without_record_has_note() {
        let context = build_context(&Intent::new(Category::Chat), None);
        assert!(context.contains(NO_RECORD_NOTE));
    }

    #[test]
    fn test_context_truncated_on_char_boundary() {
        let players: Vec<Value> = (0..2000)
            .map(|i| json!({"name": format!("Dončić Luka {}", i)}))
            .collect();
        let record = StatRecord::new(Category::Roster).with("players", players);
        let context = build_context(&Intent::new(Category::Roster), Some(&record));
        assert_eq!(context.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[tokio::test]
    async fn test_compose_trims_answer() {
        let (composer, client) = composer("  The Thunder roster has 2 players.\n");
        let intent = Intent::new(Category::Roster).with_team("Oklahoma City Thunder");
        let record = StatRecord::new(Category::Roster).with("player_count", 2);

        let answer = composer
            .compose("Who is on the OKC roster?", &intent, Some(&record))
            .await
            .unwrap();
        assert_eq!(answer, "The Thunder roster has 2 players.");

        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].contains("Who is on the OKC roster?"));
        assert!(prompts[0].contains("\"player_count\":2"));
    }

    #[tokio::test]
    async fn test_empty_answer_is_error() {
        let (composer, _) = composer("   ");
        let err = composer
            .compose("hello", &Intent::new(Category::Chat), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CourtsideError::IntentParse(_)));
    }
}
