//! Terminal output formatter

use courtside_core::{ChatReply, Endpoint, Intent, StatRecord};
use serde_json::Value;

pub fn format_reply(reply: &ChatReply) -> String {
    format!("{}\n", reply.answer)
}

pub fn format_intent(intent: &Intent, endpoint: Option<Endpoint>) -> String {
    let mut output = format!("Intent:   {}\n", intent.category);

    let entities = intent.entities.as_map();
    if entities.is_empty() {
        output.push_str("Entities: (none)\n");
    } else {
        output.push_str("Entities:\n");
        for (slot, value) in entities {
            output.push_str(&format!("  {:<8} {}\n", slot, value));
        }
    }

    match endpoint {
        Some(endpoint) => {
            output.push_str(&format!("Lookup:   /nba{}\n", endpoint.route()));
            let missing = endpoint.missing_entities(&intent.entities);
            if !missing.is_empty() {
                output.push_str(&format!("Missing:  {}\n", missing.join(", ")));
            }
        }
        None => output.push_str("Lookup:   (none)\n"),
    }
    output
}

pub fn format_record(record: &StatRecord) -> String {
    let mut output = format!("{}\n", record.category);

    for (key, value) in &record.fields {
        match value {
            Value::Array(items) => {
                output.push_str(&format!("{} ({}):\n", key, items.len()));
                for item in items {
                    output.push_str(&format!("  - {}\n", inline(item)));
                }
            }
            other => output.push_str(&format!("{}: {}\n", key, inline(other))),
        }
    }
    output
}

/// One-line rendering; object fields with null values are skipped
fn inline(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| format!("{}={}", k, inline(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
