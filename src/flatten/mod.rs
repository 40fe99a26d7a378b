//! Flatteners: nested Cricbuzz JSON into flat records.
//!
//! Every function here is pure. Missing levels or fields produce fewer
//! records or default values, never an error.

pub mod dates;
pub mod matches;
pub mod players;
pub mod scorecard;
pub mod series;
pub mod stats;
pub mod toss;
pub mod venues;

use serde_json::Value;

pub use dates::{format_date, parse_epoch_millis, sort_by_date};
pub use matches::{flatten_matches, flatten_series_matches, InningsScore, MatchRecord, TeamSide, VenueRef};
pub use players::{
    flatten_international_teams, flatten_player_search, flatten_team_players, PlayerRecord,
    PlayerSearchHit, RoleScanner, TeamRef,
};
pub use scorecard::{flatten_scorecard, Innings, InningsBattingEntry, InningsBowlingEntry, Scorecard};
pub use series::SeriesRecord;
pub use stats::CareerTable;
pub use toss::{flatten_toss_cache, TossRecord};
pub use venues::{flatten_series_venues, flatten_venue, parse_capacity, SeriesVenue, VenueRecord};

/// Parse numeric text leniently: `,` and `*` are stripped, anything else
/// that is not a number becomes 0.
///
/// ```rust
/// use cricbuzz_analytics::flatten::parse_lenient;
///
/// assert_eq!(parse_lenient("1,234"), 1234.0);
/// assert_eq!(parse_lenient("183*"), 183.0);
/// assert_eq!(parse_lenient("N/A"), 0.0);
/// ```
pub fn parse_lenient(text: &str) -> f64 {
    parse_number(text).unwrap_or(0.0)
}

/// Strict variant of [`parse_lenient`]: `None` for non-numeric text.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && *c != '*')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Lenient number from a JSON value that may be a number or a string.
pub fn lenient_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_lenient(s),
        _ => 0.0,
    }
}

/// Lenient count; negative and fractional values are clamped/truncated.
pub fn lenient_u32(value: Option<&Value>) -> u32 {
    let n = lenient_f64(value);
    if n <= 0.0 {
        0
    } else if n >= u32::MAX as f64 {
        u32::MAX
    } else {
        n.trunc() as u32
    }
}

/// Text of a string or number field, trimmed; empty text is `None`.
pub(crate) fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First of several alternative keys that is present and not null.
pub(crate) fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| value.get(*k))
        .find(|v| !v.is_null())
}

/// Text of the first present key among alternatives.
pub(crate) fn text_of(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| text_field(value, k))
}

/// Numeric id from a number or digit string.
pub(crate) fn id_field(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Convert overs notation (`4.3` = 4 overs and 3 balls) to balls.
pub fn overs_to_balls(overs: f64) -> u32 {
    if overs <= 0.0 || !overs.is_finite() {
        return 0;
    }
    let whole = overs.trunc();
    let part = ((overs - whole) * 10.0).round();
    (whole as u32) * 6 + part as u32
}

/// Runs per six-ball over; 0 when no balls were bowled.
pub fn economy(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        runs as f64 * 6.0 / balls as f64
    }
}
