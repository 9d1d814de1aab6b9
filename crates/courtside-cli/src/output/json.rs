//! JSON output formatter

use courtside_core::{Endpoint, Intent};
use serde::Serialize;

pub fn to_pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string()) + "\n"
}

pub fn format_intent(intent: &Intent, endpoint: Option<Endpoint>) -> String {
    to_pretty(&serde_json::json!({
        "category": intent.category,
        "entities": intent.entities,
        "route": endpoint.map(|e| format!("/nba{}", e.route())),
        "missing": endpoint.map(|e| e.missing_entities(&intent.entities)).unwrap_or_default(),
    }))
}
