//! NBA season handling
//!
//! Seasons span two calendar years and are written `YYYY-YYYY`.

use crate::error::{CourtsideError, Result};
use chrono::{Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"\b(20\d{2})-(\d{2})-(\d{2})\b").unwrap();
    static ref SEASON_RANGE_RE: Regex =
        Regex::new(r"\b(20\d{2})\s*[-/]\s*(\d{4}|\d{2})\b").unwrap();
    static ref SINGLE_YEAR_RE: Regex = Regex::new(r"\b(20\d{2})\b").unwrap();
}

/// Month (1-based) in which a new season starts
const SEASON_START_MONTH: u32 = 10;

/// `start-end` as a season, only when it spans exactly one year
fn expand_range(start: i32, end_text: &str) -> Option<String> {
    let end = if end_text.len() == 4 {
        end_text.parse::<i32>().ok()?
    } else {
        let suffix = end_text.parse::<i32>().ok()?;
        let mut end = (start / 100) * 100 + suffix;
        if end < start {
            end += 100;
        }
        end
    };
    (end == start + 1).then(|| format!("{}-{}", start, end))
}

/// Season a calendar date such as `2024-01-15` falls in
fn season_of_date(text: &str) -> Option<String> {
    DATE_RE.captures_iter(text).find_map(|caps| {
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        Some(current_on(date))
    })
}

/// Infer a season from free text
///
/// - `2023-24` / `2023/24` / `2023-2024` → `2023-2024`
/// - a date such as `2024-01-15` → the season it falls in, `2023-2024`
/// - a bare year such as `2022` names the season that ends in it → `2021-2022`
///
/// A year range that is not one season long (`2019-2023`) infers nothing.
pub fn infer_from_text(text: &str) -> Option<String> {
    if let Some(season) = season_of_date(text) {
        return Some(season);
    }

    let mut saw_range = false;
    for caps in SEASON_RANGE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        // `2024-01-xx` that failed as a date is still not a season
        let rest = &text[whole.end()..];
        let mut next = rest.chars();
        if matches!(next.next(), Some('-' | '/')) && next.next().is_some_and(|c| c.is_ascii_digit())
        {
            saw_range = true;
            continue;
        }
        let start = caps[1].parse::<i32>().ok()?;
        match expand_range(start, &caps[2]) {
            Some(season) => return Some(season),
            None => saw_range = true,
        }
    }
    if saw_range {
        return None;
    }

    let caps = SINGLE_YEAR_RE.captures(text)?;
    let year = caps[1].parse::<i32>().ok()?;
    Some(format!("{}-{}", year - 1, year))
}

/// Normalize a season parameter to `YYYY-YYYY`
///
/// A bare year names the season that starts in it (`2023` → `2023-2024`).
/// Ranges must span exactly one year.
pub fn normalize(season: &str) -> Result<String> {
    let trimmed = season.trim();
    let invalid = || {
        CourtsideError::InvalidInput(format!(
            "Unrecognized season '{}'. Use YYYY or YYYY-YYYY",
            season
        ))
    };

    if let Some(caps) = SEASON_RANGE_RE.captures(trimmed) {
        if caps.get(0).map(|m| m.as_str().len()) == Some(trimmed.len()) {
            let start = caps[1].parse::<i32>().map_err(|_| invalid())?;
            return expand_range(start, &caps[2]).ok_or_else(invalid);
        }
    }

    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        let year = trimmed.parse::<i32>().map_err(|_| invalid())?;
        return Ok(format!("{}-{}", year, year + 1));
    }

    Err(invalid())
}

/// Season in progress (or most recently finished) on the given date
pub fn current_on(date: NaiveDate) -> String {
    let year = date.year();
    if date.month() >= SEASON_START_MONTH {
        format!("{}-{}", year, year + 1)
    } else {
        format!("{}-{}", year - 1, year)
    }
}

/// Season in progress today
pub fn current() -> String {
    current_on(Utc::now().date_naive())
}

/// Pick the season for a lookup: the requested one, else the configured
/// default, else the current season
pub fn resolve(requested: Option<&str>, default: Option<&str>) -> Result<String> {
    match requested.or(default) {
        Some(season) => normalize(season),
        None => Ok(current()),
    }
}
