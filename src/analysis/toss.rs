//! Toss advantage (Q17): how often the toss winner also won the match.

use std::collections::BTreeMap;

use super::stats::percentage;
use super::table::{Cell, QueryTable, TableRow};
use crate::flatten::TossRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct TossDecisionRow {
    pub decision: String,
    pub matches: usize,
    pub toss_winner_won: usize,
    pub advantage_pct: f64,
}

impl TableRow for TossDecisionRow {
    const COLUMNS: &'static [&'static str] = &["Decision", "Matches", "Toss Advantage %"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.decision.as_str().into(),
            self.matches.into(),
            self.advantage_pct.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TossSummary {
    pub matches: usize,
    pub overall_pct: f64,
    pub decisions: Vec<TossDecisionRow>,
}

impl TossSummary {
    pub fn into_table(self, title: &str) -> QueryTable {
        QueryTable::from_rows(title, &self.decisions)
            .with_metric("Matches Analysed", self.matches)
            .with_metric("Overall Toss Advantage %", self.overall_pct)
    }
}

fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// Rows with an empty or missing decision are dropped. Winners are
/// compared after trim and lower-case; a missing winner never matches.
pub fn toss_advantage(records: &[TossRecord]) -> TossSummary {
    let mut by_decision: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for record in records {
        let Some(decision) = normalized(record.decision.as_deref()) else {
            continue;
        };
        let toss = normalized(record.toss_winner.as_deref());
        let winner = normalized(record.match_winner.as_deref());
        let converted = toss.is_some() && toss == winner;

        let (matches, wins) = by_decision.entry(decision).or_default();
        *matches += 1;
        *wins += usize::from(converted);
    }

    let matches: usize = by_decision.values().map(|(m, _)| m).sum();
    let wins: usize = by_decision.values().map(|(_, w)| w).sum();
    let decisions = by_decision
        .into_iter()
        .map(|(decision, (m, w))| TossDecisionRow {
            decision,
            matches: m,
            toss_winner_won: w,
            advantage_pct: percentage(w, m),
        })
        .collect();

    TossSummary {
        matches,
        overall_pct: percentage(wins, matches),
        decisions,
    }
}
