//! Partnerships between batters at adjacent positions: century stands
//! (Q13) and pair success rates (Q24).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::stats::{mean, percentage};
use super::table::{Cell, TableRow};
use crate::cli::types::MatchId;
use crate::flatten::{Innings, Scorecard};

/// Combined runs of two batters listed at consecutive positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Partnership {
    pub first: String,
    pub second: String,
    pub runs: u32,
}

/// Adjacent pairs in batting order. A gap in positions (an unnamed row
/// was dropped) breaks adjacency.
pub fn partnerships(innings: &Innings) -> Vec<Partnership> {
    innings
        .batting
        .windows(2)
        .filter(|pair| pair[1].position == pair[0].position + 1)
        .map(|pair| Partnership {
            first: pair[0].player.clone(),
            second: pair[1].player.clone(),
            runs: pair[0].runs + pair[1].runs,
        })
        .collect()
}

pub const CENTURY: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct CenturyPartnershipRow {
    pub match_id: MatchId,
    pub innings_id: u32,
    pub first: String,
    pub second: String,
    pub runs: u32,
}

impl TableRow for CenturyPartnershipRow {
    const COLUMNS: &'static [&'static str] =
        &["Match ID", "Innings", "Player 1", "Player 2", "Combined Runs"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.match_id.as_u64().into(),
            self.innings_id.into(),
            self.first.as_str().into(),
            self.second.as_str().into(),
            self.runs.into(),
        ]
    }
}

/// Q13: adjacent pairs whose combined runs reach 100, in scorecard order.
pub fn century_partnerships(cards: &[Scorecard]) -> Vec<CenturyPartnershipRow> {
    let mut rows = Vec::new();
    for card in cards {
        for innings in &card.innings {
            rows.extend(
                partnerships(innings)
                    .into_iter()
                    .filter(|p| p.runs >= CENTURY)
                    .map(|p| CenturyPartnershipRow {
                        match_id: card.match_id,
                        innings_id: innings.innings_id,
                        first: p.first,
                        second: p.second,
                        runs: p.runs,
                    }),
            );
        }
    }
    rows
}

pub const PAIR_MIN_PARTNERSHIPS: usize = 5;
pub const SUCCESSFUL_STAND: u32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct PartnershipSuccessRow {
    pub rank: usize,
    pub first: String,
    pub second: String,
    pub partnerships: usize,
    pub average: f64,
    pub fifty_plus: usize,
    pub highest: u32,
    pub success_rate: f64,
}

impl TableRow for PartnershipSuccessRow {
    const COLUMNS: &'static [&'static str] = &[
        "Rank",
        "Player 1",
        "Player 2",
        "Total Partnerships",
        "Avg Partnership",
        "50+ Partnerships",
        "Highest",
        "Success Rate %",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.rank.into(),
            self.first.as_str().into(),
            self.second.as_str().into(),
            self.partnerships.into(),
            self.average.into(),
            self.fifty_plus.into(),
            self.highest.into(),
            self.success_rate.into(),
        ]
    }
}

/// Q24: unordered pairs (names sorted) with at least five partnerships;
/// success is the share of stands worth 50 or more.
pub fn partnership_success(cards: &[Scorecard]) -> Vec<PartnershipSuccessRow> {
    let mut stands: BTreeMap<(String, String), Vec<u32>> = BTreeMap::new();
    for innings in cards.iter().flat_map(|c| c.innings.iter()) {
        for p in partnerships(innings) {
            let key = if p.first <= p.second {
                (p.first, p.second)
            } else {
                (p.second, p.first)
            };
            stands.entry(key).or_default().push(p.runs);
        }
    }

    let mut rows: Vec<PartnershipSuccessRow> = stands
        .into_iter()
        .filter(|(_, runs)| runs.len() >= PAIR_MIN_PARTNERSHIPS)
        .map(|((first, second), runs)| {
            let as_f64: Vec<f64> = runs.iter().map(|r| *r as f64).collect();
            let fifty_plus = runs.iter().filter(|r| **r >= SUCCESSFUL_STAND).count();
            PartnershipSuccessRow {
                rank: 0,
                first,
                second,
                partnerships: runs.len(),
                average: mean(&as_f64).unwrap_or(0.0),
                fifty_plus,
                highest: runs.iter().copied().max().unwrap_or(0),
                success_rate: percentage(fifty_plus, runs.len()),
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.success_rate
            .partial_cmp(&a.success_rate)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.average.partial_cmp(&a.average).unwrap_or(Ordering::Equal))
            .then_with(|| a.first.cmp(&b.first))
            .then_with(|| a.second.cmp(&b.second))
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}
