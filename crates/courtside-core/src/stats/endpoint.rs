//! Dispatch table from intent category to stats endpoint

use crate::llm::{Category, Entities, Intent};
use serde::Serialize;

/// One of the fixed statistics lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    PlayerStats,
    TeamStats,
    TeamRoster,
    Games,
    Standings,
    HeadToHead,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::PlayerStats,
        Endpoint::TeamStats,
        Endpoint::TeamRoster,
        Endpoint::Games,
        Endpoint::Standings,
        Endpoint::HeadToHead,
    ];

    /// Endpoint serving a category; conversational queries have none
    pub fn for_category(category: Category) -> Option<Self> {
        match category {
            Category::PlayerStats => Some(Self::PlayerStats),
            Category::TeamStats => Some(Self::TeamStats),
            Category::Roster => Some(Self::TeamRoster),
            Category::Games => Some(Self::Games),
            Category::Standings => Some(Self::Standings),
            Category::HeadToHead => Some(Self::HeadToHead),
            Category::Chat => None,
        }
    }

    /// Endpoint selected by an intent. Depends on the category only.
    pub fn for_intent(intent: &Intent) -> Option<Self> {
        Self::for_category(intent.category)
    }

    /// Category this endpoint answers
    pub fn category(&self) -> Category {
        match self {
            Self::PlayerStats => Category::PlayerStats,
            Self::TeamStats => Category::TeamStats,
            Self::TeamRoster => Category::Roster,
            Self::Games => Category::Games,
            Self::Standings => Category::Standings,
            Self::HeadToHead => Category::HeadToHead,
        }
    }

    /// Route under `/nba` exposing this lookup
    pub fn route(&self) -> &'static str {
        match self {
            Self::PlayerStats => "/player-stats",
            Self::TeamStats => "/team-stats",
            Self::TeamRoster => "/team-roster",
            Self::Games => "/games",
            Self::Standings => "/standings",
            Self::HeadToHead => "/h2h",
        }
    }

    /// Provider path queried for the data itself (lookups of ids aside)
    pub fn provider_path(&self) -> &'static str {
        match self {
            Self::PlayerStats => "/games/statistics/players",
            Self::TeamStats => "/statistics",
            Self::TeamRoster => "/players",
            Self::Games | Self::HeadToHead => "/games",
            Self::Standings => "/standings",
        }
    }

    /// Entity slots that must be filled before the lookup can run
    pub fn required_entities(&self) -> &'static [&'static str] {
        match self {
            Self::PlayerStats => &["player"],
            Self::TeamStats | Self::TeamRoster => &["team"],
            Self::HeadToHead => &["team1", "team2"],
            Self::Games | Self::Standings => &[],
        }
    }

    /// Required slots absent from `entities`
    pub fn missing_entities(&self, entities: &Entities) -> Vec<&'static str> {
        let filled = entities.as_map();
        self.required_entities()
            .iter()
            .copied()
            .filter(|slot| !filled.contains_key(slot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_chat_has_no_endpoint() {
        assert_eq!(Endpoint::for_intent(&Intent::new(Category::Chat)), None);
    }

    #[test]
    fn test_category_roundtrip() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::for_category(endpoint.category()), Some(endpoint));
        }
    }

    #[test]
    fn test_missing_entities() {
        let entities = Entities {
            team1: Some("Boston Celtics".to_string()),
            ..Entities::default()
        };
        assert_eq!(Endpoint::HeadToHead.missing_entities(&entities), vec!["team2"]);
        assert!(Endpoint::Standings
            .missing_entities(&Entities::default())
            .is_empty());
        assert_eq!(
            Endpoint::PlayerStats.missing_entities(&Entities::default()),
            vec!["player"]
        );
    }

    #[test]
    fn test_routes_are_distinct() {
        let mut routes: Vec<_> = Endpoint::ALL.iter().map(|e| e.route()).collect();
        routes.sort_unstable();
        routes.dedup();
        assert_eq!(routes.len(), Endpoint::ALL.len());
    }

    fn any_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    fn any_slot() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[A-Za-z ]{1,20}")
    }

    proptest! {
        #[test]
        fn prop_endpoint_depends_only_on_category(
            category in any_category(),
            player in any_slot(),
            team in any_slot(),
            season in any_slot(),
        ) {
            let mut intent = Intent::new(category);
            intent.entities.player = player;
            intent.entities.team = team;
            intent.entities.season = season;

            let selected = Endpoint::for_intent(&intent);
            prop_assert_eq!(selected, Endpoint::for_intent(&Intent::new(category)));
            prop_assert_eq!(selected.is_none(), category == Category::Chat);

            let matching = Endpoint::ALL.iter().filter(|e| e.category() == category).count();
            prop_assert_eq!(matching, usize::from(category != Category::Chat));
        }
    }
}
