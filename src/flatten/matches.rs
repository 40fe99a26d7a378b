//! Match listings: `typeMatches → seriesMatches → seriesAdWrapper.matches`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{dates::parse_epoch_millis, id_field, lenient_f64, lenient_u32, text_field};
use crate::cli::types::format::normalize_format_label;
use crate::cli::types::{MatchId, SeriesId, TeamId, VenueId};

/// One side of a fixture.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamSide {
    pub id: Option<TeamId>,
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VenueRef {
    pub id: Option<VenueId>,
    pub ground: String,
    pub city: String,
}

impl VenueRef {
    /// `ground, city` with empty parts omitted.
    pub fn display(&self) -> String {
        match (self.ground.is_empty(), self.city.is_empty()) {
            (false, false) => format!("{}, {}", self.ground, self.city),
            (false, true) => self.ground.clone(),
            (true, false) => self.city.clone(),
            (true, true) => String::new(),
        }
    }
}

/// First-innings score as the live feed presents it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InningsScore {
    pub runs: u32,
    pub wickets: u32,
    pub overs: f64,
}

impl InningsScore {
    pub fn display(&self) -> String {
        format!("{}/{} ({} ov)", self.runs, self.wickets, self.overs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchScores {
    pub team1: Option<InningsScore>,
    pub team2: Option<InningsScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub series_id: Option<SeriesId>,
    pub series_name: String,
    pub description: String,
    pub format: String,
    pub team1: TeamSide,
    pub team2: TeamSide,
    pub venue: VenueRef,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub state: String,
    pub status: String,
    pub scores: Option<MatchScores>,
}

impl MatchRecord {
    pub fn teams(&self) -> String {
        format!("{} vs {}", self.team1.name, self.team2.name)
    }
}

/// Flatten a `matches/v1/{live,recent,upcoming}` response.
///
/// Series groups without a `seriesAdWrapper` are advert slots and are
/// skipped; any other missing level simply yields no records.
pub fn flatten_matches(root: &Value) -> Vec<MatchRecord> {
    let mut records = Vec::new();
    for type_group in array(root, "typeMatches") {
        for series_group in array(type_group, "seriesMatches") {
            let Some(wrapper) = series_group.get("seriesAdWrapper") else {
                continue;
            };
            let series_name = text_field(wrapper, "seriesName");
            for entry in array(wrapper, "matches") {
                if let Some(record) = match_entry(entry, series_name.as_deref()) {
                    records.push(record);
                }
            }
        }
    }
    records
}

/// Flatten a `series/v1/{id}` response (`matchDetails → matchDetailsMap.match`).
pub fn flatten_series_matches(root: &Value) -> Vec<MatchRecord> {
    let mut records = Vec::new();
    for block in array(root, "matchDetails") {
        let Some(map) = block.get("matchDetailsMap") else {
            continue;
        };
        for entry in array(map, "match") {
            if let Some(record) = match_entry(entry, None) {
                records.push(record);
            }
        }
    }
    records
}

fn match_entry(entry: &Value, series_name: Option<&str>) -> Option<MatchRecord> {
    let info = entry.get("matchInfo")?;
    let mut record = match_from_info(info)?;
    if record.series_name.is_empty() {
        record.series_name = series_name.unwrap_or_default().to_string();
    }
    record.scores = entry.get("matchScore").map(|score| MatchScores {
        team1: first_innings(score, "team1Score"),
        team2: first_innings(score, "team2Score"),
    });
    Some(record)
}

/// Build a record from a single `matchInfo` node; requires `matchId`.
pub fn match_from_info(info: &Value) -> Option<MatchRecord> {
    let match_id = MatchId::new(id_field(info, "matchId")?);
    let empty = Value::Null;
    let venue = info.get("venueInfo").unwrap_or(&empty);

    Some(MatchRecord {
        match_id,
        series_id: id_field(info, "seriesId").map(SeriesId::new),
        series_name: text_field(info, "seriesName").unwrap_or_default(),
        description: text_field(info, "matchDesc").unwrap_or_default(),
        format: text_field(info, "matchFormat")
            .map(|f| normalize_format_label(&f))
            .unwrap_or_default(),
        team1: team_side(info.get("team1")),
        team2: team_side(info.get("team2")),
        venue: VenueRef {
            id: id_field(venue, "id").map(VenueId::new),
            ground: text_field(venue, "ground").unwrap_or_default(),
            city: text_field(venue, "city").unwrap_or_default(),
        },
        start_date: info.get("startDate").and_then(parse_epoch_millis),
        end_date: info.get("endDate").and_then(parse_epoch_millis),
        state: text_field(info, "state").unwrap_or_default(),
        status: text_field(info, "status").unwrap_or_default(),
        scores: None,
    })
}

fn team_side(team: Option<&Value>) -> TeamSide {
    let Some(team) = team else {
        return TeamSide::default();
    };
    TeamSide {
        id: id_field(team, "teamId").map(TeamId::new),
        name: text_field(team, "teamName").unwrap_or_default(),
        short_name: text_field(team, "teamSName").unwrap_or_default(),
    }
}

fn first_innings(score: &Value, side: &str) -> Option<InningsScore> {
    let innings = score.get(side)?.get("inngs1")?;
    Some(InningsScore {
        runs: lenient_u32(innings.get("runs")),
        wickets: lenient_u32(innings.get("wickets")),
        overs: lenient_f64(innings.get("overs")),
    })
}

fn array<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|a| a.iter())
        .into_iter()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recent_fixture() -> Value {
        json!({
            "typeMatches": [
                {
                    "matchType": "International",
                    "seriesMatches": [
                        {
                            "seriesAdWrapper": {
                                "seriesId": 6732,
                                "seriesName": "India tour of Australia",
                                "matches": [
                                    {
                                        "matchInfo": {
                                            "matchId": 101,
                                            "seriesId": 6732,
                                            "seriesName": "India tour of Australia",
                                            "matchDesc": "1st ODI",
                                            "matchFormat": "ODI",
                                            "startDate": "1704067200000",
                                            "state": "Complete",
                                            "status": "India won by 5 wkts",
                                            "team1": {"teamId": 2, "teamName": "India", "teamSName": "IND"},
                                            "team2": {"teamId": 4, "teamName": "Australia", "teamSName": "AUS"},
                                            "venueInfo": {"id": 31, "ground": "MCG", "city": "Melbourne"}
                                        },
                                        "matchScore": {
                                            "team1Score": {"inngs1": {"runs": 251, "wickets": 5, "overs": 48.3}},
                                            "team2Score": {"inngs1": {"runs": 250, "wickets": 9, "overs": 50}}
                                        }
                                    }
                                ]
                            }
                        },
                        {"adDetail": {"name": "ad-slot"}}
                    ]
                },
                {
                    "matchType": "Domestic",
                    "seriesMatches": [
                        {
                            "seriesAdWrapper": {
                                "seriesName": "Ranji Trophy",
                                "matches": [
                                    {"matchInfo": {"matchId": "202", "matchFormat": "T20", "team1": {"teamName": "Mumbai"}}},
                                    {"matchScore": {}}
                                ]
                            }
                        }
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_flatten_matches_walks_every_level() {
        let records = flatten_matches(&recent_fixture());
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.match_id, MatchId::new(101));
        assert_eq!(first.series_id, Some(SeriesId::new(6732)));
        assert_eq!(first.teams(), "India vs Australia");
        assert_eq!(first.team1.short_name, "IND");
        assert_eq!(first.venue.id, Some(VenueId::new(31)));
        assert_eq!(first.venue.display(), "MCG, Melbourne");
        assert_eq!(first.status, "India won by 5 wkts");
        assert!(first.start_date.is_some());

        let scores = first.scores.as_ref().unwrap();
        assert_eq!(scores.team1.unwrap().runs, 251);
        assert_eq!(scores.team2.unwrap().wickets, 9);
    }

    #[test]
    fn test_flatten_matches_defaults_missing_fields() {
        let records = flatten_matches(&recent_fixture());
        let second = &records[1];
        assert_eq!(second.match_id, MatchId::new(202));
        assert_eq!(second.series_name, "Ranji Trophy");
        assert_eq!(second.format, "T20I");
        assert_eq!(second.team2, TeamSide::default());
        assert!(second.start_date.is_none());
        assert!(second.scores.is_none());
    }

    #[test]
    fn test_flatten_matches_absent_levels_yield_nothing() {
        assert!(flatten_matches(&json!({})).is_empty());
        assert!(flatten_matches(&json!({"typeMatches": [{}]})).is_empty());
        assert!(flatten_matches(&json!({"typeMatches": [{"seriesMatches": [{}]}]})).is_empty());
    }

    #[test]
    fn test_flatten_series_matches() {
        let root = json!({
            "matchDetails": [
                {"matchDetailsMap": {"key": "Sat, 12 Oct", "match": [
                    {"matchInfo": {"matchId": 1, "seriesId": 6732, "status": "Australia won by 10 runs",
                        "team1": {"teamName": "Australia"}, "team2": {"teamName": "India"},
                        "venueInfo": {"ground": "Adelaide Oval"}}},
                    {"matchInfo": {"matchId": 2}}
                ]}},
                {"adDetail": {}}
            ]
        });
        let records = flatten_series_matches(&root);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].venue.ground, "Adelaide Oval");
        assert_eq!(records[1].match_id, MatchId::new(2));
    }

    #[test]
    fn test_venue_display_omits_empty_parts() {
        let venue = VenueRef {
            id: None,
            ground: "Lord's".to_string(),
            city: String::new(),
        };
        assert_eq!(venue.display(), "Lord's");
        assert_eq!(VenueRef::default().display(), "");
    }
}
