//! Normalized statistics payload

use crate::llm::Category;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized statistics for one resolved entity (or the whole league)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub category: Category,
    pub fields: Map<String, Value>,
}

impl StatRecord {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            fields: Map::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String field, if present
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Length of an array field (0 when absent)
    pub fn list_len(&self, key: &str) -> usize {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_accessors() {
        let record = StatRecord::new(Category::Roster)
            .with("team", "Oklahoma City Thunder")
            .with("players", json!([{"name": "A"}, {"name": "B"}]));

        assert_eq!(record.get_str("team"), Some("Oklahoma City Thunder"));
        assert_eq!(record.list_len("players"), 2);
        assert_eq!(record.list_len("missing"), 0);
        assert!(record.get("season").is_none());
    }

    #[test]
    fn test_serializes_category_and_fields() {
        let record = StatRecord::new(Category::Standings).with("season", "2023-2024");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "standings");
        assert_eq!(json["fields"]["season"], "2023-2024");
    }
}
