//! NBA franchise directory
//!
//! Maps abbreviations and nicknames to full team names, and full names to
//! stats provider team ids.

/// A franchise known to the stats provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownTeam {
    pub name: &'static str,
    pub id: u32,
    pub code: &'static str,
    pub nickname: &'static str,
}

const fn team(
    name: &'static str,
    id: u32,
    code: &'static str,
    nickname: &'static str,
) -> KnownTeam {
    KnownTeam {
        name,
        id,
        code,
        nickname,
    }
}

/// All 30 franchises with their api-sports ids
pub const KNOWN_TEAMS: [KnownTeam; 30] = [
    team("Atlanta Hawks", 132, "ATL", "hawks"),
    team("Boston Celtics", 133, "BOS", "celtics"),
    team("Brooklyn Nets", 134, "BKN", "nets"),
    team("Charlotte Hornets", 135, "CHA", "hornets"),
    team("Chicago Bulls", 136, "CHI", "bulls"),
    team("Cleveland Cavaliers", 137, "CLE", "cavaliers"),
    team("Dallas Mavericks", 138, "DAL", "mavericks"),
    team("Denver Nuggets", 139, "DEN", "nuggets"),
    team("Detroit Pistons", 140, "DET", "pistons"),
    team("Golden State Warriors", 141, "GSW", "warriors"),
    team("Houston Rockets", 142, "HOU", "rockets"),
    team("Indiana Pacers", 143, "IND", "pacers"),
    team("Los Angeles Clippers", 144, "LAC", "clippers"),
    team("Los Angeles Lakers", 145, "LAL", "lakers"),
    team("Memphis Grizzlies", 146, "MEM", "grizzlies"),
    team("Miami Heat", 147, "MIA", "heat"),
    team("Milwaukee Bucks", 148, "MIL", "bucks"),
    team("Minnesota Timberwolves", 149, "MIN", "timberwolves"),
    team("New Orleans Pelicans", 150, "NOP", "pelicans"),
    team("New York Knicks", 151, "NYK", "knicks"),
    team("Oklahoma City Thunder", 152, "OKC", "thunder"),
    team("Orlando Magic", 153, "ORL", "magic"),
    team("Philadelphia 76ers", 154, "PHI", "76ers"),
    team("Phoenix Suns", 155, "PHX", "suns"),
    team("Portland Trail Blazers", 156, "POR", "trail blazers"),
    team("Sacramento Kings", 157, "SAC", "kings"),
    team("San Antonio Spurs", 158, "SAS", "spurs"),
    team("Toronto Raptors", 159, "TOR", "raptors"),
    team("Utah Jazz", 160, "UTA", "jazz"),
    team("Washington Wizards", 161, "WAS", "wizards"),
];

/// Colloquial names that are neither the code nor the nickname
const EXTRA_ALIASES: [(&str, &str); 10] = [
    ("sixers", "Philadelphia 76ers"),
    ("blazers", "Portland Trail Blazers"),
    ("cavs", "Cleveland Cavaliers"),
    ("mavs", "Dallas Mavericks"),
    ("wolves", "Minnesota Timberwolves"),
    ("dubs", "Golden State Warriors"),
    ("clips", "Los Angeles Clippers"),
    ("la lakers", "Los Angeles Lakers"),
    ("la clippers", "Los Angeles Clippers"),
    ("pels", "New Orleans Pelicans"),
];

/// Expand an abbreviation or nickname to the full team name
///
/// Unknown names are returned trimmed but otherwise unchanged.
pub fn normalize_team_name(name: &str) -> String {
    let trimmed = name.trim();
    let key = trimmed.to_lowercase();

    if let Some(team) = KNOWN_TEAMS.iter().find(|t| {
        t.code.eq_ignore_ascii_case(&key) || t.nickname == key || t.name.to_lowercase() == key
    }) {
        return team.name.to_string();
    }

    if let Some((_, full)) = EXTRA_ALIASES.iter().find(|(alias, _)| *alias == key) {
        return full.to_string();
    }

    trimmed.to_string()
}

/// Known franchise whose full name appears in the search term
pub fn find_by_full_name(search: &str) -> Option<&'static KnownTeam> {
    let term = search.to_lowercase();
    KNOWN_TEAMS.iter().find(|t| term.contains(&t.name.to_lowercase()))
}

/// Known franchise whose nickname appears as a whole word in the search term
pub fn find_by_nickname(search: &str) -> Option<&'static KnownTeam> {
    let term = format!(" {} ", search.to_lowercase());
    KNOWN_TEAMS
        .iter()
        .find(|t| term.contains(&format!(" {} ", t.nickname)))
}
