//! Squad listings (Q1) and role counts across international teams (Q6).

use std::collections::BTreeMap;

use super::outcome::title_case;
use super::table::{Cell, TableRow};
use crate::flatten::PlayerRecord;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct TeamPlayerRow {
    pub name: String,
    pub role: String,
    pub batting_style: String,
    pub bowling_style: String,
}

impl TableRow for TeamPlayerRow {
    const COLUMNS: &'static [&'static str] = &["Name", "Role", "Batting Style", "Bowling Style"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.name.as_str().into(),
            self.role.as_str().into(),
            self.batting_style.as_str().into(),
            self.bowling_style.as_str().into(),
        ]
    }
}

/// Q1: one row per player in squad order.
pub fn team_player_rows(players: &[PlayerRecord]) -> Vec<TeamPlayerRow> {
    players
        .iter()
        .map(|p| TeamPlayerRow {
            name: p.name.clone(),
            role: p.role.clone(),
            batting_style: p
                .batting_style
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            bowling_style: p
                .bowling_style
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleCount {
    pub role: String,
    pub players: usize,
}

impl TableRow for RoleCount {
    const COLUMNS: &'static [&'static str] = &["Role", "Player Count"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.role.as_str().into(), self.players.into()]
    }
}

/// Q6: players per title-cased role, most common first.
pub fn role_counts(players: &[PlayerRecord]) -> Vec<RoleCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for player in players {
        *counts.entry(title_case(player.role.trim())).or_default() += 1;
    }

    let mut rows: Vec<RoleCount> = counts
        .into_iter()
        .map(|(role, players)| RoleCount { role, players })
        .collect();
    rows.sort_by(|a, b| b.players.cmp(&a.players).then_with(|| a.role.cmp(&b.role)));
    rows
}
