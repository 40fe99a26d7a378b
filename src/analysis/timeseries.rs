//! Quarter-by-quarter batting trajectories (Q25).

use std::collections::{BTreeMap, BTreeSet};

use super::stats::mean;
use super::table::{Cell, TableRow};
use crate::cli::types::{MatchId, Quarter};
use crate::flatten::Scorecard;

pub const QUARTER_MIN_MATCHES: usize = 3;
pub const PLAYER_MIN_QUARTERS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Trend::Improving
        } else if current < previous {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Improving => "Improving",
            Trend::Declining => "Declining",
            Trend::Stable => "Stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerPhase {
    Ascending,
    Declining,
    Stable,
}

impl CareerPhase {
    /// Majority of improving vs declining quarters; ties are stable.
    pub fn from_trends(trends: &[Trend]) -> Self {
        let up = trends.iter().filter(|t| **t == Trend::Improving).count();
        let down = trends.iter().filter(|t| **t == Trend::Declining).count();
        match up.cmp(&down) {
            std::cmp::Ordering::Greater => CareerPhase::Ascending,
            std::cmp::Ordering::Less => CareerPhase::Declining,
            std::cmp::Ordering::Equal => CareerPhase::Stable,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CareerPhase::Ascending => "Career Ascending",
            CareerPhase::Declining => "Career Declining",
            CareerPhase::Stable => "Career Stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuarterRow {
    pub player: String,
    pub quarter: Quarter,
    pub matches: usize,
    pub average_runs: f64,
    pub average_strike_rate: f64,
    pub trend: Trend,
    pub phase: CareerPhase,
}

impl TableRow for QuarterRow {
    const COLUMNS: &'static [&'static str] = &[
        "Player",
        "Quarter",
        "Matches",
        "Avg Runs",
        "Avg Strike Rate",
        "Trend",
        "Career Phase",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            self.quarter.to_string().into(),
            self.matches.into(),
            self.average_runs.into(),
            self.average_strike_rate.into(),
            self.trend.label().into(),
            self.phase.label().into(),
        ]
    }
}

#[derive(Default)]
struct QuarterTally {
    runs: Vec<f64>,
    rates: Vec<f64>,
    matches: BTreeSet<MatchId>,
}

/// Q25: per player, quarters with at least three matches; players need
/// six such quarters. Each quarter is compared with the previous
/// qualifying one, the first being stable.
pub fn career_phases(cards: &[Scorecard]) -> Vec<QuarterRow> {
    let mut tallies: BTreeMap<String, BTreeMap<Quarter, QuarterTally>> = BTreeMap::new();
    for card in cards {
        let Some(date) = card.start_date else {
            continue;
        };
        let quarter = Quarter::of(&date);
        for entry in card.batting_entries() {
            let tally = tallies
                .entry(entry.player.clone())
                .or_default()
                .entry(quarter)
                .or_default();
            tally.runs.push(entry.runs as f64);
            tally.rates.push(entry.strike_rate);
            tally.matches.insert(card.match_id);
        }
    }

    let mut rows = Vec::new();
    for (player, quarters) in tallies {
        let qualifying: Vec<(Quarter, usize, f64, f64)> = quarters
            .into_iter()
            .filter(|(_, t)| t.matches.len() >= QUARTER_MIN_MATCHES)
            .map(|(q, t)| {
                (
                    q,
                    t.matches.len(),
                    mean(&t.runs).unwrap_or(0.0),
                    mean(&t.rates).unwrap_or(0.0),
                )
            })
            .collect();
        if qualifying.len() < PLAYER_MIN_QUARTERS {
            continue;
        }

        let trends: Vec<Trend> = qualifying
            .iter()
            .enumerate()
            .map(|(i, (_, _, avg, _))| match i {
                0 => Trend::Stable,
                _ => Trend::between(qualifying[i - 1].2, *avg),
            })
            .collect();
        let phase = CareerPhase::from_trends(&trends);

        rows.extend(qualifying.into_iter().zip(trends).map(
            |((quarter, matches, average_runs, average_strike_rate), trend)| QuarterRow {
                player: player.clone(),
                quarter,
                matches,
                average_runs,
                average_strike_rate,
                trend,
                phase,
            },
        ));
    }
    rows
}
