//! Per-innings batting and bowling tables from a scorecard response.
//!
//! Accepts both shapes Cricbuzz serves: the `scard` lists (`batsman[]`,
//! `bowler[]`, lower-case keys such as `strkrate` and `outdec`) and the
//! match-center maps (`batsmenData`, `bowlersData`, camel-case keys).

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{dates::parse_epoch_millis, field, id_field, lenient_f64, lenient_u32, text_of};
use crate::cli::types::format::normalize_format_label;
use crate::cli::types::{MatchId, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InningsBattingEntry {
    /// 1-based order in the source list.
    pub position: u32,
    pub player_id: Option<PlayerId>,
    pub player: String,
    pub runs: u32,
    pub balls: u32,
    pub strike_rate: f64,
    pub fours: u32,
    pub sixes: u32,
    pub dismissal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InningsBowlingEntry {
    pub player_id: Option<PlayerId>,
    pub player: String,
    pub overs: f64,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Innings {
    pub innings_id: u32,
    pub batting_team: String,
    pub score: u32,
    pub wickets: u32,
    pub overs: f64,
    pub batting: Vec<InningsBattingEntry>,
    pub bowling: Vec<InningsBowlingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub match_id: MatchId,
    pub format: Option<String>,
    pub venue: Option<String>,
    pub status: String,
    pub start_date: Option<DateTime<Utc>>,
    pub innings: Vec<Innings>,
}

impl Scorecard {
    pub fn batting_entries(&self) -> impl Iterator<Item = &InningsBattingEntry> {
        self.innings.iter().flat_map(|i| i.batting.iter())
    }

    pub fn bowling_entries(&self) -> impl Iterator<Item = &InningsBowlingEntry> {
        self.innings.iter().flat_map(|i| i.bowling.iter())
    }
}

/// Flatten a scorecard snapshot (`scorecard[]` plus optional `matchInfo`
/// and top-level `status`).
pub fn flatten_scorecard(match_id: MatchId, root: &Value) -> Scorecard {
    let empty = Value::Null;
    let info = field(root, &["matchInfo", "matchHeader"]).unwrap_or(&empty);

    let format = text_of(info, &["matchFormat"]).map(|f| normalize_format_label(&f));
    let venue = info
        .get("venueInfo")
        .and_then(|v| text_of(v, &["ground"]))
        .or_else(|| text_of(root, &["venue"]));
    let status = text_of(root, &["status"])
        .or_else(|| text_of(info, &["status"]))
        .unwrap_or_default();
    let start_date = field(info, &["startDate", "matchStartTimestamp"]).and_then(parse_epoch_millis);

    let innings = root
        .get("scorecard")
        .or_else(|| root.get("scoreCard"))
        .and_then(Value::as_array)
        .map(|list| list.iter().map(flatten_innings).collect())
        .unwrap_or_default();

    Scorecard {
        match_id,
        format,
        venue,
        status,
        start_date,
        innings,
    }
}

fn flatten_innings(node: &Value) -> Innings {
    let score = field(node, &["scoreDetails"]).unwrap_or(node);
    let batting_team = node
        .get("batTeamDetails")
        .and_then(|t| text_of(t, &["batTeamName"]))
        .or_else(|| text_of(node, &["batteamname", "batTeamName"]))
        .unwrap_or_default();

    Innings {
        innings_id: lenient_u32(field(node, &["inningsid", "inningsId"])),
        batting_team,
        score: lenient_u32(field(score, &["score", "runs"])),
        wickets: lenient_u32(field(score, &["wickets"])),
        overs: lenient_f64(field(score, &["overs"])),
        batting: batting_entries(node),
        bowling: bowling_entries(node),
    }
}

fn batting_entries(node: &Value) -> Vec<InningsBattingEntry> {
    let mut rows = rows_of(node, &["batsman", "batsmanPerformance"], "batsmenData");
    if rows.is_empty() {
        if let Some(team) = node.get("batTeamDetails") {
            rows = rows_of(team, &[], "batsmenData");
        }
    }
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let player = text_of(row, &["name", "batName"])?;
            Some(InningsBattingEntry {
                position: index as u32 + 1,
                player_id: id_of(row, &["id", "batId"]),
                player,
                runs: lenient_u32(row.get("runs")),
                balls: lenient_u32(row.get("balls")),
                strike_rate: lenient_f64(field(row, &["strkrate", "strikeRate"])),
                fours: lenient_u32(row.get("fours")),
                sixes: lenient_u32(row.get("sixes")),
                dismissal: text_of(row, &["outdec", "outDesc"]).unwrap_or_default(),
            })
        })
        .collect()
}

fn bowling_entries(node: &Value) -> Vec<InningsBowlingEntry> {
    let mut rows = rows_of(node, &["bowler"], "bowlersData");
    if rows.is_empty() {
        if let Some(team) = node.get("bowlTeamDetails") {
            rows = rows_of(team, &[], "bowlersData");
        }
    }
    rows.into_iter()
        .filter_map(|row| {
            let player = text_of(row, &["name", "bowlName"])?;
            Some(InningsBowlingEntry {
                player_id: id_of(row, &["id", "bowlerId", "bowlId"]),
                player,
                overs: lenient_f64(row.get("overs")),
                maidens: lenient_u32(row.get("maidens")),
                runs: lenient_u32(row.get("runs")),
                wickets: lenient_u32(row.get("wickets")),
                economy: lenient_f64(row.get("economy")),
            })
        })
        .collect()
}

/// Rows from the first non-empty list key, else from a keyed map such as
/// `{"bat_1": {...}, "bat_2": {...}}` ordered by the numeric key suffix.
fn rows_of<'a>(node: &'a Value, list_keys: &[&str], map_key: &str) -> Vec<&'a Value> {
    for key in list_keys {
        if let Some(list) = node.get(*key).and_then(Value::as_array) {
            if !list.is_empty() {
                return list.iter().collect();
            }
        }
    }

    let Some(map) = node.get(map_key).and_then(Value::as_object) else {
        return Vec::new();
    };
    let mut keyed: Vec<(u64, &String, &Value)> = map
        .iter()
        .map(|(k, v)| (key_suffix(k), k, v))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    keyed.into_iter().map(|(_, _, v)| v).collect()
}

fn key_suffix(key: &str) -> u64 {
    let digits: String = key
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().unwrap_or(u64::MAX)
}

fn id_of(row: &Value, keys: &[&str]) -> Option<PlayerId> {
    keys.iter()
        .find_map(|k| id_field(row, k))
        .filter(|id| *id > 0)
        .map(PlayerId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scard_fixture() -> Value {
        json!({
            "status": "India won by 6 runs",
            "matchInfo": {
                "matchFormat": "T20",
                "venueInfo": {"ground": "Wankhede Stadium"},
                "startDate": "1704067200000"
            },
            "scorecard": [
                {
                    "inningsid": 1,
                    "batteamname": "India",
                    "score": 180,
                    "wickets": 6,
                    "overs": 20,
                    "batsman": [
                        {"id": 1, "name": "Opener One", "runs": "45", "balls": 30, "strkrate": "150.00", "fours": 4, "sixes": 2, "outdec": "c X b Y"},
                        {"id": 2, "name": "Opener Two", "runs": 70, "balls": 41, "strkrate": "170.73", "fours": 6, "sixes": 4, "outdec": "not out"},
                        {"id": 3, "name": "", "runs": 0},
                        {"id": 4, "name": "Number Four", "runs": "N/A", "balls": "-"}
                    ],
                    "bowler": [
                        {"id": 9, "name": "Quick", "overs": "4", "maidens": 0, "runs": 32, "wickets": 2, "economy": "8.00"}
                    ]
                },
                {"inningsid": 2}
            ]
        })
    }

    #[test]
    fn test_flatten_scorecard_reads_both_lists() {
        let card = flatten_scorecard(MatchId::new(55), &scard_fixture());

        assert_eq!(card.match_id, MatchId::new(55));
        assert_eq!(card.format.as_deref(), Some("T20I"));
        assert_eq!(card.venue.as_deref(), Some("Wankhede Stadium"));
        assert_eq!(card.status, "India won by 6 runs");
        assert!(card.start_date.is_some());
        assert_eq!(card.innings.len(), 2);

        let first = &card.innings[0];
        assert_eq!(first.innings_id, 1);
        assert_eq!(first.batting_team, "India");
        assert_eq!(first.score, 180);
        assert_eq!(first.batting.len(), 3);
        assert_eq!(first.batting[1].strike_rate, 170.73);
        assert_eq!(first.batting[1].dismissal, "not out");
        assert_eq!(first.bowling[0].economy, 8.0);

        assert!(card.innings[1].batting.is_empty());
        assert!(card.innings[1].bowling.is_empty());
    }

    #[test]
    fn test_nameless_row_consumes_a_position() {
        let card = flatten_scorecard(MatchId::new(55), &scard_fixture());
        let positions: Vec<u32> = card.innings[0].batting.iter().map(|b| b.position).collect();
        assert_eq!(positions, vec![1, 2, 4]);
        assert_eq!(card.innings[0].batting[2].runs, 0);
        assert_eq!(card.innings[0].batting[2].balls, 0);
    }

    #[test]
    fn test_batsman_performance_fallback() {
        let root = json!({"scorecard": [{"inningsId": 3, "batsman": [], "batsmanPerformance": [{"name": "Solo", "runs": 12}]}]});
        let card = flatten_scorecard(MatchId::new(1), &root);
        assert_eq!(card.innings[0].innings_id, 3);
        assert_eq!(card.innings[0].batting[0].player, "Solo");
        assert_eq!(card.innings[0].batting[0].position, 1);
    }

    #[test]
    fn test_match_center_maps_sorted_by_key_suffix() {
        let mut batsmen = serde_json::Map::new();
        for n in [10, 2, 1] {
            batsmen.insert(
                format!("bat_{}", n),
                json!({"batId": n, "batName": format!("P{}", n), "runs": n, "strikeRate": 100.0, "outDesc": "b X"}),
            );
        }
        let root = json!({
            "scoreCard": [{
                "inningsId": 1,
                "batTeamDetails": {"batTeamName": "England", "batsmenData": Value::Object(batsmen)},
                "bowlTeamDetails": {"bowlersData": {"bowl_1": {"bowlerId": 7, "bowlName": "Spinner", "overs": 2, "runs": 9, "wickets": 1}}},
                "scoreDetails": {"runs": 13, "wickets": 2, "overs": 3.2}
            }]
        });
        let card = flatten_scorecard(MatchId::new(2), &root);
        let innings = &card.innings[0];

        let names: Vec<&str> = innings.batting.iter().map(|b| b.player.as_str()).collect();
        assert_eq!(names, vec!["P1", "P2", "P10"]);
        assert_eq!(innings.batting_team, "England");
        assert_eq!(innings.score, 13);
        assert_eq!(innings.batting[0].dismissal, "b X");
        assert_eq!(innings.batting[0].player_id, Some(PlayerId::new(1)));
        assert_eq!(innings.bowling[0].player, "Spinner");
        assert_eq!(innings.bowling[0].wickets, 1);
    }

    #[test]
    fn test_empty_root_has_no_innings() {
        let card = flatten_scorecard(MatchId::new(9), &json!({}));
        assert!(card.innings.is_empty());
        assert_eq!(card.status, "");
        assert!(card.format.is_none());
    }
}
