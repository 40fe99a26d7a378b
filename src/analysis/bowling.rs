//! Bowler performance per venue (Q14).

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::table::{Cell, TableRow};
use crate::cli::types::MatchId;
use crate::flatten::{economy, overs_to_balls, Scorecard};

pub const VENUE_MIN_APPEARANCES: usize = 3;
const UNKNOWN_VENUE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct BowlerVenueRow {
    pub bowler: String,
    pub venue: String,
    pub matches: usize,
    pub wickets: u32,
    pub runs: u32,
    pub balls: u32,
    pub economy: f64,
}

impl BowlerVenueRow {
    /// Overs notation, e.g. 27 balls → `4.3`.
    pub fn overs(&self) -> String {
        format!("{}.{}", self.balls / 6, self.balls % 6)
    }
}

impl TableRow for BowlerVenueRow {
    const COLUMNS: &'static [&'static str] =
        &["Bowler", "Venue", "Matches", "Total Wickets", "Runs", "Overs", "Economy"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.bowler.as_str().into(),
            self.venue.as_str().into(),
            self.matches.into(),
            self.wickets.into(),
            self.runs.into(),
            self.overs().into(),
            self.economy.into(),
        ]
    }
}

#[derive(Default)]
struct SpellTally {
    matches: BTreeSet<MatchId>,
    runs: u32,
    balls: u32,
    wickets: u32,
}

/// Q14: group spells by (bowler, venue); keep pairs with at least three
/// match appearances. Economy is total runs over total overs, with the
/// overs notation converted through balls.
pub fn bowler_venue_performance(cards: &[Scorecard]) -> Vec<BowlerVenueRow> {
    let mut tallies: BTreeMap<(String, String), SpellTally> = BTreeMap::new();
    for card in cards {
        let venue = card
            .venue
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN_VENUE);
        for spell in card.bowling_entries() {
            let tally = tallies
                .entry((spell.player.clone(), venue.to_string()))
                .or_default();
            tally.matches.insert(card.match_id);
            tally.runs += spell.runs;
            tally.balls += overs_to_balls(spell.overs);
            tally.wickets += spell.wickets;
        }
    }

    let mut rows: Vec<BowlerVenueRow> = tallies
        .into_iter()
        .filter(|(_, t)| t.matches.len() >= VENUE_MIN_APPEARANCES)
        .map(|((bowler, venue), t)| BowlerVenueRow {
            bowler,
            venue,
            matches: t.matches.len(),
            wickets: t.wickets,
            runs: t.runs,
            balls: t.balls,
            economy: economy(t.runs, t.balls),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.wickets
            .cmp(&a.wickets)
            .then_with(|| a.economy.partial_cmp(&b.economy).unwrap_or(Ordering::Equal))
            .then_with(|| a.bowler.cmp(&b.bowler))
            .then_with(|| a.venue.cmp(&b.venue))
    });
    rows
}
