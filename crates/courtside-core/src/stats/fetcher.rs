//! Stats fetcher: intent in, normalized record out

use super::endpoint::Endpoint;
use super::normalize;
use super::provider::{is_empty_payload, HttpStatsProvider, Params, StatsProvider};
use super::record::StatRecord;
use super::season;
use super::teams;
use crate::config::StatsProviderConfig;
use crate::error::{CourtsideError, Result};
use crate::llm::{Category, Entities, Intent};
use serde_json::Value;
use std::sync::Arc;

/// A team resolved to its provider id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTeam {
    pub id: u64,
    pub name: String,
}

/// A player resolved to its provider id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlayer {
    pub id: u64,
    pub name: String,
}

/// Maps intents onto the stats provider
pub struct StatsFetcher {
    provider: Arc<dyn StatsProvider>,
    league_id: u32,
    default_season: Option<String>,
}

impl StatsFetcher {
    /// Create from a provider
    pub fn new(provider: Arc<dyn StatsProvider>, config: &StatsProviderConfig) -> Self {
        Self {
            provider,
            league_id: config.league_id,
            default_season: config.default_season.clone(),
        }
    }

    /// Create with the HTTP provider from configuration
    pub fn from_config(config: &StatsProviderConfig) -> Result<Self> {
        let provider = HttpStatsProvider::new(config)?;
        Ok(Self::new(Arc::new(provider), config))
    }

    /// Fetch the record an intent asks for
    pub async fn fetch(&self, intent: &Intent) -> Result<StatRecord> {
        let endpoint = Endpoint::for_intent(intent).ok_or_else(|| {
            CourtsideError::InvalidInput(format!(
                "Intent '{}' has no stats endpoint",
                intent.category
            ))
        })?;
        self.fetch_endpoint(endpoint, &intent.entities).await
    }

    /// Run one endpoint with the given entities
    pub async fn fetch_endpoint(
        &self,
        endpoint: Endpoint,
        entities: &Entities,
    ) -> Result<StatRecord> {
        let missing = endpoint.missing_entities(entities);
        if !missing.is_empty() {
            return Err(CourtsideError::InvalidInput(format!(
                "{} lookup needs: {}",
                endpoint.category(),
                missing.join(", ")
            )));
        }

        let season = season::resolve(
            entities.season.as_deref(),
            self.default_season.as_deref(),
        )?;
        tracing::info!("Fetching {:?} for season {}", endpoint, season);

        // missing_entities() guarantees the required slots below
        let slot = |value: &Option<String>| value.clone().unwrap_or_default();
        match endpoint {
            Endpoint::PlayerStats => self.player_stats(&slot(&entities.player), &season).await,
            Endpoint::TeamStats => self.team_stats(&slot(&entities.team), &season).await,
            Endpoint::TeamRoster => self.roster(&slot(&entities.team), &season).await,
            Endpoint::Games => self.games(entities.team.as_deref(), &season).await,
            Endpoint::Standings => self.standings(&season).await,
            Endpoint::HeadToHead => {
                self.head_to_head(&slot(&entities.team1), &slot(&entities.team2), &season)
                    .await
            }
        }
    }

    fn league_params(&self, season: &str) -> Params {
        vec![
            ("league", self.league_id.to_string()),
            ("season", season.to_string()),
        ]
    }

    /// Season-long per-game averages for a player
    pub async fn player_stats(&self, player: &str, season: &str) -> Result<StatRecord> {
        let resolved = self.resolve_player(player).await?;
        let params = vec![
            ("player", resolved.id.to_string()),
            ("season", season.to_string()),
        ];
        let payload = self
            .provider
            .get(Endpoint::PlayerStats.provider_path(), &params)
            .await?;
        if is_empty_payload(&payload) {
            return Err(CourtsideError::NotFound(format!(
                "No stats for {} in {}",
                resolved.name, season
            )));
        }

        let mut record = StatRecord::new(Category::PlayerStats)
            .with("player_id", resolved.id)
            .with("player", resolved.name)
            .with("season", season);
        record
            .fields
            .extend(normalize::player_averages(&normalize::items(&payload)));
        Ok(record)
    }

    /// Season statistics for a team
    pub async fn team_stats(&self, team: &str, season: &str) -> Result<StatRecord> {
        let resolved = self.resolve_team(team, season).await?;
        let mut params = self.league_params(season);
        params.push(("team", resolved.id.to_string()));

        let payload = self
            .provider
            .get(Endpoint::TeamStats.provider_path(), &params)
            .await?;
        if is_empty_payload(&payload) {
            return Err(CourtsideError::NotFound(format!(
                "No stats for {} in {}",
                resolved.name, season
            )));
        }

        let statistics = match payload {
            Value::Array(mut items) if items.len() == 1 => items.remove(0),
            other => other,
        };
        Ok(StatRecord::new(Category::TeamStats)
            .with("team_id", resolved.id)
            .with("team", resolved.name)
            .with("season", season)
            .with("statistics", statistics))
    }

    /// Players on a team's roster
    pub async fn roster(&self, team: &str, season: &str) -> Result<StatRecord> {
        let resolved = self.resolve_team(team, season).await?;
        let params = vec![
            ("team", resolved.id.to_string()),
            ("season", season.to_string()),
        ];
        let payload = self
            .provider
            .get(Endpoint::TeamRoster.provider_path(), &params)
            .await?;
        let players: Vec<Value> = normalize::items(&payload)
            .into_iter()
            .map(normalize::roster_player)
            .collect();
        if players.is_empty() {
            return Err(CourtsideError::NotFound(format!(
                "No players found for {} in {}",
                resolved.name, season
            )));
        }

        Ok(StatRecord::new(Category::Roster)
            .with("team_id", resolved.id)
            .with("team", resolved.name)
            .with("season", season)
            .with("player_count", players.len())
            .with("players", players))
    }

    /// Game results and schedule, league-wide or for one team
    pub async fn games(&self, team: Option<&str>, season: &str) -> Result<StatRecord> {
        let resolved = match team {
            Some(name) => Some(self.resolve_team(name, season).await?),
            None => None,
        };
        let mut params = self.league_params(season);
        if let Some(ref t) = resolved {
            params.push(("team", t.id.to_string()));
        }

        let payload = self
            .provider
            .get(Endpoint::Games.provider_path(), &params)
            .await?;
        let games = normalize::items(&payload);
        if games.is_empty() {
            return Err(CourtsideError::NotFound(format!("No games found for {}", season)));
        }

        let mut record = StatRecord::new(Category::Games).with("season", season);
        if let Some(t) = resolved {
            record.insert("team_id", t.id);
            record.insert("team", t.name);
        }
        record.insert("total_games", games.len());
        record.insert(
            "games",
            normalize::recent_games(&games, normalize::MAX_GAMES),
        );
        record.insert(
            "upcoming",
            normalize::upcoming_games(&games, normalize::MAX_UPCOMING),
        );
        Ok(record)
    }

    /// League standings table
    pub async fn standings(&self, season: &str) -> Result<StatRecord> {
        let payload = self
            .provider
            .get(
                Endpoint::Standings.provider_path(),
                &self.league_params(season),
            )
            .await?;
        let rows = normalize::standings_rows(&payload);
        if rows.is_empty() {
            return Err(CourtsideError::NotFound(format!(
                "No standings found for {}",
                season
            )));
        }

        Ok(StatRecord::new(Category::Standings)
            .with("season", season)
            .with("standings", rows))
    }

    /// Games between two teams
    pub async fn head_to_head(
        &self,
        team1: &str,
        team2: &str,
        season: &str,
    ) -> Result<StatRecord> {
        let first = self.resolve_team(team1, season).await?;
        let second = self.resolve_team(team2, season).await?;
        if first.id == second.id {
            return Err(CourtsideError::InvalidInput(format!(
                "Head-to-head needs two different teams, got {} twice",
                first.name
            )));
        }

        let (low, high) = (first.id.min(second.id), first.id.max(second.id));
        let mut h2h = format!("{}-{}", low, high);
        let mut params = self.league_params(season);
        params.push(("h2h", h2h.clone()));

        let mut payload = self
            .provider
            .get(Endpoint::HeadToHead.provider_path(), &params)
            .await?;
        if is_empty_payload(&payload) {
            h2h = format!("{}-{}", high, low);
            tracing::debug!("Retrying head-to-head with reversed key {}", h2h);
            if let Some(entry) = params.iter_mut().find(|(key, _)| *key == "h2h") {
                entry.1 = h2h.clone();
            }
            payload = self
                .provider
                .get(Endpoint::HeadToHead.provider_path(), &params)
                .await?;
        }

        let games = normalize::items(&payload);
        if games.is_empty() {
            return Err(CourtsideError::NotFound(format!(
                "No head-to-head games between {} and {} in {}",
                first.name, second.name, season
            )));
        }

        Ok(StatRecord::new(Category::HeadToHead)
            .with("team1", first.name)
            .with("team2", second.name)
            .with("season", season)
            .with("h2h", h2h)
            .with("total_games", games.len())
            .with("wins", normalize::win_counts(&games))
            .with("games", normalize::recent_games(&games, games.len()))
            .with("upcoming", normalize::upcoming_games(&games, games.len())))
    }

    /// Resolve a team name to its provider id
    pub async fn resolve_team(&self, name: &str, season: &str) -> Result<ResolvedTeam> {
        let normalized = teams::normalize_team_name(name);
        if normalized.is_empty() {
            return Err(CourtsideError::InvalidInput("Provide a team name".to_string()));
        }

        if let Some(known) = teams::find_by_full_name(&normalized) {
            return Ok(ResolvedTeam {
                id: u64::from(known.id),
                name: known.name.to_string(),
            });
        }

        let term = normalized.to_lowercase();
        let mut params = self.league_params(season);
        params.push(("search", normalized.clone()));
        match self.provider.get("/teams", &params).await {
            Ok(payload) => {
                let hit = normalize::items(&payload).into_iter().find_map(|team| {
                    let id = team.get("id")?.as_u64()?;
                    let team_name = team.get("name")?.as_str()?;
                    let lowered = team_name.to_lowercase();
                    (lowered.contains(&term) || term.contains(&lowered)).then(|| ResolvedTeam {
                        id,
                        name: team_name.to_string(),
                    })
                });
                if let Some(team) = hit {
                    return Ok(team);
                }
            }
            Err(CourtsideError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        if let Some(known) = teams::find_by_nickname(&normalized) {
            return Ok(ResolvedTeam {
                id: u64::from(known.id),
                name: known.name.to_string(),
            });
        }

        Err(CourtsideError::NotFound(format!("Team '{}' not found", name.trim())))
    }

    /// Resolve a player name to its provider id
    pub async fn resolve_player(&self, name: &str) -> Result<ResolvedPlayer> {
        let wanted = name.trim().to_lowercase();
        let words: Vec<&str> = wanted.split_whitespace().collect();
        let Some(last) = words.last().copied() else {
            return Err(CourtsideError::InvalidInput("Provide a player name".to_string()));
        };
        let first = if words.len() > 1 { words[0] } else { "" };

        let payload = match self
            .provider
            .get("/players", &vec![("search", last.to_string())])
            .await
        {
            Ok(payload) => payload,
            Err(CourtsideError::NotFound(_)) => Value::Null,
            Err(e) => return Err(e),
        };

        let candidates = normalize::items(&payload);
        let pick = pick_player(&candidates, &wanted, first, last).ok_or_else(|| {
            CourtsideError::NotFound(format!("Player '{}' not found", name.trim()))
        })?;

        let id = pick
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| CourtsideError::NotFound(format!("Player '{}' has no id", name)))?;
        let resolved_name = pick
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_string();
        tracing::debug!("Resolved player '{}' to {} ({})", name, resolved_name, id);

        Ok(ResolvedPlayer {
            id,
            name: resolved_name,
        })
    }
}

/// Choose the best search hit for a player name
///
/// The provider stores names as `Last First`; preference goes to exact
/// matches in either order, then hits containing both names, then US
/// players, then the first hit.
fn pick_player<'a>(
    candidates: &[&'a Value],
    wanted: &str,
    first: &str,
    last: &str,
) -> Option<&'a Value> {
    let name_of = |p: &Value| {
        p.get("name")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_lowercase()
    };
    let reversed = format!("{} {}", last, first);

    candidates
        .iter()
        .copied()
        .find(|p| {
            let n = name_of(*p);
            n == wanted || (!first.is_empty() && n == reversed)
        })
        .or_else(|| {
            candidates.iter().copied().find(|p| {
                let n = name_of(*p);
                n.contains(last) && n.contains(first)
            })
        })
        .or_else(|| {
            candidates
                .iter()
                .copied()
                .find(|p| p.get("country").and_then(Value::as_str) == Some("USA"))
        })
        .or_else(|| candidates.first().copied())
}
