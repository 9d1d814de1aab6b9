//! Intent resolution using an external LLM service

use super::client::extract_json_object;
use super::{Category, ChatMessage, CompletionOptions, Entities, Intent, LLMClient};
use crate::config::LLMServiceConfig;
use crate::error::{CourtsideError, Result};
use crate::stats::{season, teams};
use serde_json::Value;
use std::sync::Arc;

/// Token budget for the extraction call
const INTENT_MAX_TOKENS: u32 = 400;

const INTENT_SYSTEM_PROMPT: &str = r#"You are an assistant that extracts structured JSON commands for an NBA stats chatbot.

Return ONLY valid JSON with this structure:

{
  "intent": "player_stats | team_stats | standings | games | team_roster | h2h | chit_chat",
  "player_name": null or string,
  "team_name": null or string,
  "team1": null or string,
  "team2": null or string,
  "season": null or string
}

NBA rules:
- NBA seasons span 2 calendar years. "2022 season" means the 2021-2022 season; write it as "2021-2022".
- "2023-24" or "2023/24" is written "2023-2024".
- Expand team abbreviations such as "OKC" or "LAL" to full names ("Oklahoma City Thunder", "Los Angeles Lakers").

Intents:
- A specific player: "player_stats" with "player_name".
- A specific team's performance, record, wins/losses or stats: "team_stats" with "team_name".
- Standings, rankings, seeds, who is first/last in a conference: "standings".
- Games, schedule or results: "games" (with "team_name" when one team is named).
- "who is on X", "X roster", "players on X": "team_roster" with "team_name".
- Two teams compared head-to-head: "h2h" with "team1" and "team2".
- General chat that stats cannot answer: "chit_chat".

Examples:
User: "Give me Nikola Jokic's stats for 2022 season"
-> {"intent": "player_stats", "player_name": "Nikola Jokic", "team_name": null, "team1": null, "team2": null, "season": "2021-2022"}

User: "Who is on the OKC roster?"
-> {"intent": "team_roster", "player_name": null, "team_name": "Oklahoma City Thunder", "team1": null, "team2": null, "season": null}

User: "How do the Lakers and Celtics compare head to head?"
-> {"intent": "h2h", "player_name": null, "team_name": null, "team1": "Los Angeles Lakers", "team2": "Boston Celtics", "season": null}

Return ONLY JSON. No explanations, no extra keys."#;

/// Turns free text into an [`Intent`] via the LLM service
pub struct IntentResolver {
    client: Arc<dyn LLMClient>,
}

impl IntentResolver {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Create from configuration
    pub fn from_config(config: LLMServiceConfig) -> Result<Self> {
        let client = super::HttpLLMClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Resolve a natural language question
    pub async fn resolve(&self, query: &str) -> Result<Intent> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CourtsideError::InvalidInput("No message provided".to_string()));
        }

        let messages = vec![
            ChatMessage::system(INTENT_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "User question:\n{}\n\nReturn the JSON command.",
                query
            )),
        ];

        let response = self
            .client
            .chat_completion(messages, CompletionOptions::deterministic(INTENT_MAX_TOKENS))
            .await?;

        let intent = parse_intent_response(&response, query)?;
        tracing::info!(
            "Resolved intent {} with entities {:?}",
            intent.category,
            intent.entities.as_map()
        );
        Ok(intent)
    }
}

/// Parse the model's JSON command and apply the cleanup heuristics
pub fn parse_intent_response(response: &str, original_query: &str) -> Result<Intent> {
    let parsed = extract_json_object(response).ok_or_else(|| {
        tracing::warn!("No JSON in intent output: {}", truncate(response, 400));
        CourtsideError::IntentParse(format!(
            "expected a JSON command, got: {}",
            truncate(response, 200)
        ))
    })?;

    let category = match parsed.get("intent") {
        Some(Value::String(label)) => label
            .parse::<Category>()
            .map_err(CourtsideError::IntentParse)?,
        Some(other) if !other.is_null() => {
            return Err(CourtsideError::IntentParse(format!(
                "intent must be a string, got {}",
                other
            )))
        }
        _ => {
            return Err(CourtsideError::IntentParse(
                "model output has no intent".to_string(),
            ))
        }
    };

    let entities = Entities {
        player: slot(&parsed, &["player_name", "player"])?,
        team: slot(&parsed, &["team_name", "team"])?,
        team1: slot(&parsed, &["team1"])?,
        team2: slot(&parsed, &["team2"])?,
        season: slot(&parsed, &["season"])?,
    };

    Ok(post_process(Intent { category, entities }, original_query))
}

/// Read an optional string slot, trying each key in order
fn slot(parsed: &Value, keys: &[&str]) -> Result<Option<String>> {
    for key in keys {
        match parsed.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
                    continue;
                }
                return Ok(Some(trimmed.to_string()));
            }
            Some(Value::Number(n)) => return Ok(Some(n.to_string())),
            Some(other) => {
                return Err(CourtsideError::IntentParse(format!(
                    "field '{}' must be a string, got {}",
                    key, other
                )))
            }
        }
    }
    Ok(None)
}

/// Normalize teams and seasons, and rescue obvious stats questions that the
/// model filed as chat
fn post_process(mut intent: Intent, original_query: &str) -> Intent {
    let entities = &mut intent.entities;
    for team in [&mut entities.team, &mut entities.team1, &mut entities.team2] {
        if let Some(name) = team.as_deref() {
            *team = Some(teams::normalize_team_name(name));
        }
    }

    entities.season = entities
        .season
        .as_deref()
        .and_then(season::infer_from_text)
        .or_else(|| season::infer_from_text(original_query));

    if intent.category == Category::Chat {
        let lowered = original_query.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| lowered.contains(w));

        if mentions(&["roster", "who is on", "lineup"][..]) {
            intent.category = Category::Roster;
        } else if mentions(&["stats", "averages", "box score"][..]) {
            if intent.entities.player.is_some() {
                intent.category = Category::PlayerStats;
            } else if intent.entities.team.is_some() {
                intent.category = Category::TeamStats;
            }
        }
    }

    intent
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
