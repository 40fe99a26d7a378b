//! Team squads, international team lists and player search results.

use serde::Serialize;
use serde_json::Value;

use super::{id_field, text_field};
use crate::cli::types::{PlayerId, TeamId};

pub const UNKNOWN_ROLE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub name: String,
    pub role: String,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub team_id: Option<TeamId>,
}

/// Role inference over a squad's `player[]` list.
///
/// Cricbuzz interleaves section headers ("BATSMEN", "BOWLERS", ...) with
/// players. A header is an entry whose `id` is absent or null; every
/// player takes the most recent header as its role. A header without a
/// name resets the role to unknown.
#[derive(Debug, Default)]
pub struct RoleScanner {
    current_role: Option<String>,
}

impl RoleScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_role(&self) -> &str {
        self.current_role.as_deref().unwrap_or(UNKNOWN_ROLE)
    }

    /// Feed the next entry; returns a record for player entries only.
    pub fn scan(&mut self, entry: &Value, team_id: Option<TeamId>) -> Option<PlayerRecord> {
        if is_header(entry) {
            self.current_role = text_field(entry, "name");
            return None;
        }

        let player_id = PlayerId::new(id_field(entry, "id")?);
        Some(PlayerRecord {
            player_id,
            name: text_field(entry, "name").unwrap_or_default(),
            role: self.current_role().to_string(),
            batting_style: text_field(entry, "battingStyle"),
            bowling_style: text_field(entry, "bowlingStyle"),
            team_id,
        })
    }
}

fn is_header(entry: &Value) -> bool {
    entry.get("id").map_or(true, Value::is_null)
}

/// Flatten a `teams/v1/{id}/players` response, in source order.
pub fn flatten_team_players(root: &Value, team_id: Option<TeamId>) -> Vec<PlayerRecord> {
    let mut scanner = RoleScanner::new();
    root.get("player")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| scanner.scan(entry, team_id))
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
}

/// Flatten `teams/v1/international`; entries without a `teamId` are
/// section labels and are skipped.
pub fn flatten_international_teams(root: &Value) -> Vec<TeamRef> {
    root.get("list")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    Some(TeamRef {
                        id: TeamId::new(id_field(entry, "teamId")?),
                        name: text_field(entry, "teamName").unwrap_or_default(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSearchHit {
    pub player_id: PlayerId,
    pub name: String,
    pub team_name: Option<String>,
}

/// Flatten `stats/v1/player/search`.
pub fn flatten_player_search(root: &Value) -> Vec<PlayerSearchHit> {
    root.get("player")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    Some(PlayerSearchHit {
                        player_id: PlayerId::new(id_field(entry, "id")?),
                        name: text_field(entry, "name").unwrap_or_default(),
                        team_name: text_field(entry, "teamName"),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
