//! Batting queries over stored scorecards: highest scores (Q7), close
//! matches (Q15), yearly averages (Q16), consistency (Q19) and recent
//! form (Q23).

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Datelike;

use super::outcome::{parse_outcome, MatchOutcome};
use super::stats::{mean, sample_std};
use super::table::{Cell, TableRow};
use crate::cli::types::{MatchFormat, MatchId};
use crate::flatten::{MatchRecord, Scorecard};

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighestScoreRow {
    pub format: MatchFormat,
    pub runs: u32,
    pub player: String,
    pub match_id: MatchId,
}

impl TableRow for HighestScoreRow {
    const COLUMNS: &'static [&'static str] = &["Format", "Highest Score", "Player", "Match ID"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.format.to_string().into(),
            self.runs.into(),
            self.player.as_str().into(),
            self.match_id.as_u64().into(),
        ]
    }
}

/// Q7: one row per format that has any batting data; the first innings
/// reaching the maximum wins ties.
pub fn highest_scores_by_format(cards: &[Scorecard]) -> Vec<HighestScoreRow> {
    MatchFormat::ALL
        .iter()
        .filter_map(|format| {
            let mut best: Option<HighestScoreRow> = None;
            for card in cards {
                if !card.format.as_deref().is_some_and(|f| format.matches_label(f)) {
                    continue;
                }
                for entry in card.batting_entries() {
                    if best.as_ref().map_or(true, |b| entry.runs > b.runs) {
                        best = Some(HighestScoreRow {
                            format: *format,
                            runs: entry.runs,
                            player: entry.player.clone(),
                            match_id: card.match_id,
                        });
                    }
                }
            }
            best
        })
        .collect()
}

pub const CLOSE_MATCH_TOP: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ClosePerformerRow {
    pub player: String,
    pub average_runs: f64,
    pub innings: usize,
    pub matches: usize,
    pub team_wins: usize,
}

impl TableRow for ClosePerformerRow {
    const COLUMNS: &'static [&'static str] =
        &["Player", "Avg Runs", "Innings", "Close Matches", "Team Wins"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            self.average_runs.into(),
            self.innings.into(),
            self.matches.into(),
            self.team_wins.into(),
        ]
    }
}

#[derive(Default)]
struct CloseTally {
    runs: Vec<f64>,
    matches: BTreeSet<MatchId>,
    wins: BTreeSet<MatchId>,
}

/// Q15: batting in matches decided by at most 10 runs or 2 wickets. A
/// team win counts when the innings' batting side is the winner.
pub fn close_match_performers(matches: &[MatchRecord], cards: &[Scorecard]) -> Vec<ClosePerformerRow> {
    let close: HashMap<MatchId, MatchOutcome> = matches
        .iter()
        .filter_map(|m| {
            parse_outcome(&m.status)
                .filter(MatchOutcome::is_close)
                .map(|o| (m.match_id, o))
        })
        .collect();

    let mut tallies: BTreeMap<String, CloseTally> = BTreeMap::new();
    for card in cards {
        let Some(outcome) = close.get(&card.match_id) else {
            continue;
        };
        for innings in &card.innings {
            let won = outcome.won_by(&innings.batting_team);
            for entry in &innings.batting {
                let tally = tallies.entry(entry.player.clone()).or_default();
                tally.runs.push(entry.runs as f64);
                tally.matches.insert(card.match_id);
                if won {
                    tally.wins.insert(card.match_id);
                }
            }
        }
    }

    let mut rows: Vec<ClosePerformerRow> = tallies
        .into_iter()
        .map(|(player, t)| ClosePerformerRow {
            player,
            average_runs: mean(&t.runs).unwrap_or(0.0),
            innings: t.runs.len(),
            matches: t.matches.len(),
            team_wins: t.wins.len(),
        })
        .collect();
    rows.sort_by(|a, b| desc(a.average_runs, b.average_runs).then_with(|| a.player.cmp(&b.player)));
    rows.truncate(CLOSE_MATCH_TOP);
    rows
}

pub const YEARLY_SINCE: i32 = 2020;
pub const YEARLY_MIN_MATCHES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct YearlyBattingRow {
    pub player: String,
    pub year: i32,
    pub matches: usize,
    pub average_runs: f64,
    pub average_strike_rate: f64,
}

impl TableRow for YearlyBattingRow {
    const COLUMNS: &'static [&'static str] =
        &["Player", "Year", "Matches", "Avg Runs", "Avg Strike Rate"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            self.year.into(),
            self.matches.into(),
            self.average_runs.into(),
            self.average_strike_rate.into(),
        ]
    }
}

/// Q16: per player and calendar year from `since`, at least five
/// distinct matches. Undated scorecards are skipped.
pub fn yearly_batting(cards: &[Scorecard], since: i32) -> Vec<YearlyBattingRow> {
    let mut groups: BTreeMap<(String, i32), (Vec<f64>, Vec<f64>, BTreeSet<MatchId>)> = BTreeMap::new();
    for card in cards {
        let Some(year) = card.start_date.map(|d| d.year()) else {
            continue;
        };
        if year < since {
            continue;
        }
        for entry in card.batting_entries() {
            let (runs, rates, ids) = groups.entry((entry.player.clone(), year)).or_default();
            runs.push(entry.runs as f64);
            rates.push(entry.strike_rate);
            ids.insert(card.match_id);
        }
    }

    let mut rows: Vec<YearlyBattingRow> = groups
        .into_iter()
        .filter(|(_, (_, _, ids))| ids.len() >= YEARLY_MIN_MATCHES)
        .map(|((player, year), (runs, rates, ids))| YearlyBattingRow {
            player,
            year,
            matches: ids.len(),
            average_runs: mean(&runs).unwrap_or(0.0),
            average_strike_rate: mean(&rates).unwrap_or(0.0),
        })
        .collect();
    rows.sort_by(|a, b| {
        a.year
            .cmp(&b.year)
            .then_with(|| desc(a.average_runs, b.average_runs))
            .then_with(|| a.player.cmp(&b.player))
    });
    rows
}

pub const CONSISTENCY_MIN_BALLS: u32 = 10;
pub const CONSISTENCY_MIN_INNINGS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyRow {
    pub player: String,
    pub innings: usize,
    pub average_runs: f64,
    pub std_runs: f64,
    pub average_balls: f64,
    pub coefficient_of_variation: Option<f64>,
}

impl TableRow for ConsistencyRow {
    const COLUMNS: &'static [&'static str] =
        &["Player", "Innings", "Avg Runs", "Std Dev Runs", "Avg Balls", "CV"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            self.innings.into(),
            self.average_runs.into(),
            self.std_runs.into(),
            self.average_balls.into(),
            self.coefficient_of_variation.into(),
        ]
    }
}

/// Q19: innings of at least ten balls; players with three or more such
/// innings, steadiest (lowest sample std) first.
pub fn batting_consistency(cards: &[Scorecard]) -> Vec<ConsistencyRow> {
    let mut groups: BTreeMap<String, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for entry in cards.iter().flat_map(|c| c.batting_entries()) {
        if entry.balls < CONSISTENCY_MIN_BALLS {
            continue;
        }
        let (runs, balls) = groups.entry(entry.player.clone()).or_default();
        runs.push(entry.runs as f64);
        balls.push(entry.balls as f64);
    }

    let mut rows: Vec<ConsistencyRow> = groups
        .into_iter()
        .filter(|(_, (runs, _))| runs.len() >= CONSISTENCY_MIN_INNINGS)
        .map(|(player, (runs, balls))| {
            let average_runs = mean(&runs).unwrap_or(0.0);
            let std_runs = sample_std(&runs).unwrap_or(0.0);
            ConsistencyRow {
                player,
                innings: runs.len(),
                average_runs,
                std_runs,
                average_balls: mean(&balls).unwrap_or(0.0),
                coefficient_of_variation: (average_runs > 0.0).then(|| std_runs / average_runs),
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        a.std_runs
            .partial_cmp(&b.std_runs)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.player.cmp(&b.player))
    });
    rows
}

pub const FORM_MIN_INNINGS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCategory {
    Excellent,
    Good,
    Average,
    Poor,
}

impl FormCategory {
    /// First matching rule wins: Excellent, Good, Poor, then Average.
    pub fn classify(avg5: f64, avg10: f64, fifties: usize, std10: Option<f64>) -> Self {
        let std = std10.unwrap_or(0.0);
        if avg5 > avg10 && fifties >= 3 && std < 25.0 {
            FormCategory::Excellent
        } else if avg5 >= avg10 && fifties >= 2 {
            FormCategory::Good
        } else if avg5 < avg10 && std > 35.0 {
            FormCategory::Poor
        } else {
            FormCategory::Average
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormCategory::Excellent => "Excellent Form",
            FormCategory::Good => "Good Form",
            FormCategory::Average => "Average Form",
            FormCategory::Poor => "Poor Form",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormRow {
    pub player: String,
    pub avg_last5: f64,
    pub avg_last10: f64,
    pub sr_last5: f64,
    pub sr_last10: f64,
    pub sr_trend: f64,
    pub fifties_last10: usize,
    pub std_last10: Option<f64>,
    pub consistency: f64,
    pub category: FormCategory,
}

impl TableRow for FormRow {
    const COLUMNS: &'static [&'static str] = &[
        "Player",
        "Avg Last 5",
        "Avg Last 10",
        "SR Last 5",
        "SR Last 10",
        "SR Trend",
        "50+ Last 10",
        "Std Last 10",
        "Consistency",
        "Form",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            self.avg_last5.into(),
            self.avg_last10.into(),
            self.sr_last5.into(),
            self.sr_last10.into(),
            self.sr_trend.into(),
            self.fifties_last10.into(),
            self.std_last10.into(),
            self.consistency.into(),
            self.category.label().into(),
        ]
    }
}

/// `100 / (1 + std)`, or 0 when the deviation is zero or undefined.
pub fn consistency_score(std: Option<f64>) -> f64 {
    match std {
        Some(s) if s > 0.0 => 100.0 / (1.0 + s),
        _ => 0.0,
    }
}

/// Q23: players with at least ten innings; the most recent innings are
/// those with the highest match ids.
pub fn player_form(cards: &[Scorecard]) -> Vec<FormRow> {
    let mut innings: BTreeMap<String, Vec<(MatchId, f64, f64)>> = BTreeMap::new();
    for card in cards {
        for entry in card.batting_entries() {
            innings
                .entry(entry.player.clone())
                .or_default()
                .push((card.match_id, entry.runs as f64, entry.strike_rate));
        }
    }

    innings
        .into_iter()
        .filter(|(_, list)| list.len() >= FORM_MIN_INNINGS)
        .map(|(player, mut list)| {
            list.sort_by(|a, b| b.0.cmp(&a.0));
            let runs: Vec<f64> = list.iter().map(|(_, r, _)| *r).collect();
            let rates: Vec<f64> = list.iter().map(|(_, _, sr)| *sr).collect();

            let avg_last5 = mean(&runs[..5]).unwrap_or(0.0);
            let avg_last10 = mean(&runs[..10]).unwrap_or(0.0);
            let sr_last5 = mean(&rates[..5]).unwrap_or(0.0);
            let sr_last10 = mean(&rates[..10]).unwrap_or(0.0);
            let fifties_last10 = runs[..10].iter().filter(|r| **r >= 50.0).count();
            let std_last10 = sample_std(&runs[..10]);

            FormRow {
                player,
                avg_last5,
                avg_last10,
                sr_last5,
                sr_last10,
                sr_trend: sr_last5 - sr_last10,
                fifties_last10,
                std_last10,
                consistency: consistency_score(std_last10),
                category: FormCategory::classify(avg_last5, avg_last10, fifties_last10, std_last10),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{bat, card, innings, on};
    use crate::flatten::matches::match_from_info;
    use serde_json::json;

    #[test]
    fn test_highest_scores_by_format() {
        let cards = vec![
            card(1, "ODI", vec![innings("India", vec![bat("A", 120, 100), bat("B", 30, 20)], vec![])]),
            card(2, "ODI", vec![innings("India", vec![bat("C", 120, 90)], vec![])]),
            card(3, "T20I", vec![innings("India", vec![bat("D", 88, 40)], vec![])]),
        ];
        let rows = highest_scores_by_format(&cards);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].format, MatchFormat::ODI);
        assert_eq!(rows[0].player, "A");
        assert_eq!(rows[0].match_id, MatchId::new(1));
        assert_eq!(rows[1].format, MatchFormat::T20I);
        assert_eq!(rows[1].runs, 88);
    }

    #[test]
    fn test_highest_scores_accepts_t20_label() {
        let cards = vec![card(1, "T20", vec![innings("X", vec![bat("E", 10, 5)], vec![])])];
        let rows = highest_scores_by_format(&cards);
        assert_eq!(rows[0].format, MatchFormat::T20I);
    }

    fn listing(id: u64, status: &str) -> MatchRecord {
        match_from_info(&json!({"matchId": id, "status": status})).unwrap()
    }

    #[test]
    fn test_close_match_performers() {
        let matches = vec![
            listing(1, "India won by 7 runs"),
            listing(2, "Australia won by 2 wkts"),
            listing(3, "India won by 15 runs"),
        ];
        let cards = vec![
            card(1, "ODI", vec![
                innings("India", vec![bat("Kohli", 80, 70)], vec![]),
                innings("Australia", vec![bat("Smith", 60, 70)], vec![]),
            ]),
            card(2, "ODI", vec![
                innings("India", vec![bat("Kohli", 20, 30)], vec![]),
                innings("Australia", vec![bat("Smith", 70, 80)], vec![]),
            ]),
            card(3, "ODI", vec![innings("India", vec![bat("Kohli", 150, 120)], vec![])]),
        ];

        let rows = close_match_performers(&matches, &cards);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "Smith");
        assert_eq!(rows[0].average_runs, 65.0);
        assert_eq!(rows[0].team_wins, 1);
        assert_eq!(rows[1].player, "Kohli");
        assert_eq!(rows[1].average_runs, 50.0);
        assert_eq!(rows[1].matches, 2);
        assert_eq!(rows[1].team_wins, 1);
    }

    #[test]
    fn test_yearly_batting() {
        let mut cards: Vec<Scorecard> = (1..=5)
            .map(|i| on(card(i, "ODI", vec![innings("I", vec![bat("Steady", 40 + i as u32, 50)], vec![])]), 2023, i as u32, 1))
            .collect();
        cards.push(on(card(6, "ODI", vec![innings("I", vec![bat("Steady", 100, 50)], vec![])]), 2019, 6, 1));
        cards.push(card(7, "ODI", vec![innings("I", vec![bat("Steady", 100, 50)], vec![])]));
        for i in 10..14 {
            cards.push(on(card(i, "ODI", vec![innings("I", vec![bat("Few", 90, 50)], vec![])]), 2023, 2, 1));
        }

        let rows = yearly_batting(&cards, YEARLY_SINCE);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player, "Steady");
        assert_eq!(rows[0].year, 2023);
        assert_eq!(rows[0].matches, 5);
        assert_eq!(rows[0].average_runs, 43.0);
    }

    #[test]
    fn test_batting_consistency() {
        let cards = vec![
            card(1, "ODI", vec![innings("I", vec![bat("Even", 30, 30), bat("Wild", 0, 12), bat("Short", 50, 9)], vec![])]),
            card(2, "ODI", vec![innings("I", vec![bat("Even", 32, 30), bat("Wild", 100, 60), bat("Short", 50, 20)], vec![])]),
            card(3, "ODI", vec![innings("I", vec![bat("Even", 34, 30), bat("Wild", 50, 40), bat("Short", 50, 20)], vec![])]),
        ];
        let rows = batting_consistency(&cards);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "Even");
        assert_eq!(rows[0].std_runs, 2.0);
        assert_eq!(rows[0].average_runs, 32.0);
        assert_eq!(rows[0].coefficient_of_variation, Some(2.0 / 32.0));
        assert_eq!(rows[1].player, "Wild");
        assert_eq!(rows[1].std_runs, 50.0);
    }

    #[test]
    fn test_consistency_score() {
        assert_eq!(consistency_score(None), 0.0);
        assert_eq!(consistency_score(Some(0.0)), 0.0);
        assert_eq!(consistency_score(Some(4.0)), 20.0);
    }

    #[test]
    fn test_form_categories() {
        assert_eq!(FormCategory::classify(60.0, 50.0, 3, Some(20.0)), FormCategory::Excellent);
        assert_eq!(FormCategory::classify(60.0, 50.0, 3, Some(30.0)), FormCategory::Good);
        assert_eq!(FormCategory::classify(50.0, 50.0, 2, Some(40.0)), FormCategory::Good);
        assert_eq!(FormCategory::classify(20.0, 50.0, 1, Some(40.0)), FormCategory::Poor);
        assert_eq!(FormCategory::classify(20.0, 50.0, 1, Some(10.0)), FormCategory::Average);
        assert_eq!(FormCategory::Poor.label(), "Poor Form");
    }

    #[test]
    fn test_player_form_uses_latest_innings() {
        // Match ids 1..=12; the oldest two innings are outside the window.
        let cards: Vec<Scorecard> = (1..=12)
            .map(|i| {
                let runs = if i > 7 { 60 } else if i > 2 { 20 } else { 500 };
                card(i, "ODI", vec![innings("I", vec![bat("Form", runs, 40)], vec![])])
            })
            .chain(std::iter::once(card(20, "ODI", vec![innings("I", vec![bat("Rare", 10, 10)], vec![])])))
            .collect();

        let rows = player_form(&cards);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.avg_last5, 60.0);
        assert_eq!(row.avg_last10, 40.0);
        assert_eq!(row.fifties_last10, 5);
        assert_eq!(row.sr_trend, 50.0);
        assert!(row.std_last10.unwrap() < 25.0);
        assert_eq!(row.category, FormCategory::Excellent);
    }
}
