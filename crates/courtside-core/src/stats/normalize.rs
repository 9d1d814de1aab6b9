//! Reshape raw provider payloads into flat, LLM-friendly records

use serde_json::{json, Map, Value};

/// Most recent results kept in a games record
pub const MAX_GAMES: usize = 25;

/// Next fixtures kept alongside the results
pub const MAX_UPCOMING: usize = 5;

/// Read a number that the provider may encode as a number or a string
fn number_at(value: &Value, path: &[&str]) -> Option<f64> {
    let mut current = value;
    for key in path {
        current = current.get(*key)?;
    }
    match current {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    }
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.get(*key)?;
    }
    current.as_str()
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn percentage(made: f64, attempts: f64) -> Value {
    if attempts > 0.0 {
        json!(round1(made / attempts * 100.0))
    } else {
        Value::Null
    }
}

/// Items of an array payload; a single object counts as one item
pub fn items(payload: &Value) -> Vec<&Value> {
    match payload {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn sum_at(games: &[&Value], path: &[&str]) -> f64 {
    games.iter().filter_map(|g| number_at(g, path)).sum()
}

/// Per-game averages from a player's game log
pub fn player_averages(games: &[&Value]) -> Map<String, Value> {
    let mut out = Map::new();
    let played: Vec<&Value> = games
        .iter()
        .copied()
        .filter(|g| !matches!(g.get("minutes"), Some(Value::Null)))
        .collect();
    out.insert("games_played".into(), json!(played.len()));
    if played.is_empty() {
        return out;
    }

    let n = played.len() as f64;
    let sum = |path: &[&str]| sum_at(&played, path);

    out.insert("points_per_game".into(), json!(round1(sum(&["points"][..]) / n)));
    out.insert(
        "rebounds_per_game".into(),
        json!(round1(sum(&["rebounds", "total"][..]) / n)),
    );
    out.insert("assists_per_game".into(), json!(round1(sum(&["assists"][..]) / n)));
    out.insert(
        "field_goal_pct".into(),
        percentage(
            sum(&["field_goals", "total"][..]),
            sum(&["field_goals", "attempts"][..]),
        ),
    );
    out.insert(
        "three_point_pct".into(),
        percentage(
            sum(&["threepoint_goals", "total"][..]),
            sum(&["threepoint_goals", "attempts"][..]),
        ),
    );
    out.insert(
        "free_throw_pct".into(),
        percentage(
            sum(&["freethrows_goals", "total"][..]),
            sum(&["freethrows_goals", "attempts"][..]),
        ),
    );
    out
}

/// Roster entry
pub fn roster_player(player: &Value) -> Value {
    json!({
        "name": str_at(player, &["name"]),
        "position": str_at(player, &["position"]),
        "number": player.get("number").cloned().unwrap_or(Value::Null),
        "country": str_at(player, &["country"]),
    })
}

/// Game summary
pub fn game_summary(game: &Value) -> Value {
    json!({
        "date": str_at(game, &["date"]),
        "status": str_at(game, &["status", "long"]),
        "home": str_at(game, &["teams", "home", "name"]),
        "away": str_at(game, &["teams", "away", "name"]),
        "home_score": number_at(game, &["scores", "home", "total"]),
        "away_score": number_at(game, &["scores", "away", "total"]),
    })
}

/// A game with a final or live score; fixtures have null totals
pub fn is_played(game: &Value) -> bool {
    number_at(game, &["scores", "home", "total"]).is_some()
        && number_at(game, &["scores", "away", "total"]).is_some()
}

fn date_of(game: &Value) -> &str {
    str_at(game, &["date"]).unwrap_or("")
}

/// Summaries of the most recent `limit` played games, newest first
pub fn recent_games(games: &[&Value], limit: usize) -> Vec<Value> {
    let mut played: Vec<&Value> = games.iter().copied().filter(|g| is_played(g)).collect();
    // ISO-8601 dates sort lexically
    played.sort_by(|a, b| date_of(b).cmp(date_of(a)));
    played.into_iter().take(limit).map(game_summary).collect()
}

/// Summaries of the next `limit` unplayed games, soonest first
pub fn upcoming_games(games: &[&Value], limit: usize) -> Vec<Value> {
    let mut fixtures: Vec<&Value> = games.iter().copied().filter(|g| !is_played(g)).collect();
    fixtures.sort_by(|a, b| date_of(a).cmp(date_of(b)));
    fixtures.into_iter().take(limit).map(game_summary).collect()
}

/// Wins per team name among finished games
pub fn win_counts(games: &[&Value]) -> Map<String, Value> {
    let mut wins: Map<String, Value> = Map::new();
    for game in games {
        let (Some(home), Some(away)) = (
            number_at(game, &["scores", "home", "total"]),
            number_at(game, &["scores", "away", "total"]),
        ) else {
            continue;
        };
        let winner = if home > away {
            str_at(game, &["teams", "home", "name"])
        } else if away > home {
            str_at(game, &["teams", "away", "name"])
        } else {
            None
        };
        if let Some(name) = winner {
            let count = wins.get(name).and_then(Value::as_u64).unwrap_or(0);
            wins.insert(name.to_string(), json!(count + 1));
        }
    }
    wins
}

/// Flatten standings groups into rows
///
/// The provider nests rows in one array per conference/division; some
/// responses wrap them further under `league.standings`.
pub fn standings_rows(payload: &Value) -> Vec<Value> {
    let mut rows = Vec::new();
    collect_standings(payload, &mut rows);
    rows
}

fn collect_standings(value: &Value, rows: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_standings(item, rows);
            }
        }
        Value::Object(map) if map.contains_key("team") => {
            rows.push(json!({
                "position": number_at(value, &["position"]),
                "team": str_at(value, &["team", "name"]),
                "group": str_at(value, &["group", "name"]),
                "played": number_at(value, &["games", "played"]),
                "wins": number_at(value, &["games", "win", "total"]),
                "losses": number_at(value, &["games", "lose", "total"]),
                "win_pct": number_at(value, &["games", "win", "percentage"]),
            }));
        }
        Value::Object(map) => {
            if let Some(inner) = map.get("league").and_then(|l| l.get("standings")) {
                collect_standings(inner, rows);
            }
        }
        _ => {}
    }
}
