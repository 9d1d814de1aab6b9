//! Intent types
//!
//! Structured interpretation of a user's question, produced by the
//! intent resolver and consumed by the stats fetcher.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// What kind of answer the user is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    PlayerStats,
    TeamStats,
    Roster,
    Games,
    Standings,
    HeadToHead,
    /// Conversation that cannot be answered from stats
    Chat,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::PlayerStats,
        Category::TeamStats,
        Category::Roster,
        Category::Games,
        Category::Standings,
        Category::HeadToHead,
        Category::Chat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayerStats => "player-stats",
            Self::TeamStats => "team-stats",
            Self::Roster => "roster",
            Self::Games => "games",
            Self::Standings => "standings",
            Self::HeadToHead => "head-to-head",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the canonical names as well as the snake_case labels the
    /// extraction prompt asks the model to emit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "player-stats" => Ok(Self::PlayerStats),
            "team-stats" => Ok(Self::TeamStats),
            "roster" | "team-roster" => Ok(Self::Roster),
            "games" | "schedule" => Ok(Self::Games),
            "standings" => Ok(Self::Standings),
            "head-to-head" | "h2h" => Ok(Self::HeadToHead),
            "chat" | "chit-chat" => Ok(Self::Chat),
            other => Err(format!("unknown intent category '{}'", other)),
        }
    }
}

/// Named values extracted from the question
///
/// Any slot may be missing; consumers must tolerate partial maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.as_map().is_empty()
    }

    /// Filled slots keyed by slot name
    pub fn as_map(&self) -> BTreeMap<&'static str, &str> {
        let slots = [
            ("player", &self.player),
            ("team", &self.team),
            ("team1", &self.team1),
            ("team2", &self.team2),
            ("season", &self.season),
        ];
        slots
            .into_iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
            .collect()
    }
}

/// Structured interpretation of a user query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub category: Category,
    #[serde(default)]
    pub entities: Entities,
}

impl Intent {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entities: Entities::default(),
        }
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.entities.player = Some(player.into());
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.entities.team = Some(team.into());
        self
    }

    pub fn with_teams(mut self, team1: impl Into<String>, team2: impl Into<String>) -> Self {
        self.entities.team1 = Some(team1.into());
        self.entities.team2 = Some(team2.into());
        self
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.entities.season = Some(season.into());
        self
    }
}
