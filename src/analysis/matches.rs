//! Queries over match listings: recent matches (Q2), wins per team (Q5),
//! completed results (Q10) and head-to-head records (Q22).

use std::collections::{BTreeMap, HashMap};

use super::outcome::{parse_outcome, winner_title, VictoryType};
use super::stats::{mean, percentage};
use super::table::{Cell, TableRow};
use crate::flatten::{format_date, sort_by_date, MatchRecord, TeamSide};

#[derive(Debug, Clone, PartialEq)]
pub struct RecentMatchRow {
    pub description: String,
    pub series: String,
    pub status: String,
    pub format: String,
    pub date: String,
    pub teams: String,
    pub venue: String,
    pub venue_id: Option<u64>,
}

impl TableRow for RecentMatchRow {
    const COLUMNS: &'static [&'static str] = &[
        "Match", "Series", "Status", "Format", "Date", "Teams", "Venue", "Venue ID",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.description.as_str().into(),
            self.series.as_str().into(),
            self.status.as_str().into(),
            self.format.as_str().into(),
            self.date.as_str().into(),
            self.teams.as_str().into(),
            self.venue.as_str().into(),
            self.venue_id.into(),
        ]
    }
}

/// Q2: most recent first, undated last.
pub fn recent_match_rows(matches: &[MatchRecord]) -> Vec<RecentMatchRow> {
    let mut sorted: Vec<&MatchRecord> = matches.iter().collect();
    sort_by_date(&mut sorted, |m| m.start_date, true);
    sorted
        .into_iter()
        .map(|m| RecentMatchRow {
            description: m.description.clone(),
            series: m.series_name.clone(),
            status: m.status.clone(),
            format: m.format.clone(),
            date: format_date(m.start_date.as_ref()),
            teams: m.teams(),
            venue: m.venue.display(),
            venue_id: m.venue.id.map(|v| v.as_u64()),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamWins {
    pub team: String,
    pub wins: usize,
}

impl TableRow for TeamWins {
    const COLUMNS: &'static [&'static str] = &["Team", "Wins"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.team.as_str().into(), self.wins.into()]
    }
}

/// Q5: statuses without `" won "` do not count.
pub fn team_wins(matches: &[MatchRecord]) -> Vec<TeamWins> {
    let mut wins: BTreeMap<String, usize> = BTreeMap::new();
    for winner in matches.iter().filter_map(|m| winner_title(&m.status)) {
        *wins.entry(winner).or_default() += 1;
    }
    let mut rows: Vec<TeamWins> = wins
        .into_iter()
        .map(|(team, wins)| TeamWins { team, wins })
        .collect();
    rows.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.team.cmp(&b.team)));
    rows
}

pub const COMPLETED_MATCH_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedMatchRow {
    pub description: String,
    pub team1: String,
    pub team2: String,
    pub winner: String,
    pub margin: Option<u32>,
    pub victory_type: Option<String>,
    pub venue: String,
}

impl TableRow for CompletedMatchRow {
    const COLUMNS: &'static [&'static str] = &[
        "Match Description",
        "Team 1",
        "Team 2",
        "Winning Team",
        "Victory Margin",
        "Victory Type",
        "Venue",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.description.as_str().into(),
            self.team1.as_str().into(),
            self.team2.as_str().into(),
            self.winner.as_str().into(),
            self.margin.into(),
            self.victory_type.clone().into(),
            self.venue.as_str().into(),
        ]
    }
}

/// Q10: decided matches, most recent first, at most `limit`.
pub fn completed_matches(matches: &[MatchRecord], limit: usize) -> Vec<CompletedMatchRow> {
    let mut decided: Vec<(&MatchRecord, _)> = matches
        .iter()
        .filter_map(|m| parse_outcome(&m.status).map(|o| (m, o)))
        .collect();
    sort_by_date(&mut decided, |(m, _)| m.start_date, true);

    decided
        .into_iter()
        .take(limit)
        .map(|(m, outcome)| CompletedMatchRow {
            description: m.description.clone(),
            team1: m.team1.name.clone(),
            team2: m.team2.name.clone(),
            winner: outcome.winner,
            margin: outcome.margin,
            victory_type: outcome.victory_type.map(|v| v.to_string()),
            venue: m.venue.display(),
        })
        .collect()
}

pub const HEAD_TO_HEAD_MIN_MEETINGS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct HeadToHeadRow {
    pub team1: String,
    pub team2: String,
    pub matches: usize,
    pub team1_wins: usize,
    pub team2_wins: usize,
    pub team1_win_pct: f64,
    pub team2_win_pct: f64,
    pub team1_avg_run_margin: Option<f64>,
    pub team1_avg_wicket_margin: Option<f64>,
    pub team2_avg_run_margin: Option<f64>,
    pub team2_avg_wicket_margin: Option<f64>,
}

impl TableRow for HeadToHeadRow {
    const COLUMNS: &'static [&'static str] = &[
        "Team 1",
        "Team 2",
        "Total Matches",
        "Team 1 Wins",
        "Team 2 Wins",
        "Team 1 Win %",
        "Team 2 Win %",
        "Team 1 Avg Run Margin",
        "Team 1 Avg Wicket Margin",
        "Team 2 Avg Run Margin",
        "Team 2 Avg Wicket Margin",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.team1.as_str().into(),
            self.team2.as_str().into(),
            self.matches.into(),
            self.team1_wins.into(),
            self.team2_wins.into(),
            self.team1_win_pct.into(),
            self.team2_win_pct.into(),
            self.team1_avg_run_margin.into(),
            self.team1_avg_wicket_margin.into(),
            self.team2_avg_run_margin.into(),
            self.team2_avg_wicket_margin.into(),
        ]
    }
}

#[derive(Default)]
struct PairTally {
    matches: usize,
    wins: [usize; 2],
    run_margins: [Vec<f64>; 2],
    wicket_margins: [Vec<f64>; 2],
}

fn side_matches(side: &TeamSide, winner: &str) -> bool {
    (!side.name.is_empty() && side.name.eq_ignore_ascii_case(winner))
        || (!side.short_name.is_empty() && side.short_name.eq_ignore_ascii_case(winner))
}

fn is_void(status: &str) -> bool {
    let lower = status.to_lowercase();
    lower.contains("abandon") || lower.contains("no result")
}

/// Q22: unordered team pairs with at least five meetings. With a
/// `fixed_pair` only that pair is reported, whenever the two teams met at all.
pub fn head_to_head(
    matches: &[MatchRecord],
    fixed_pair: Option<(&str, &str)>,
) -> Vec<HeadToHeadRow> {
    let mut tallies: HashMap<(String, String), PairTally> = HashMap::new();

    for m in matches {
        if m.team1.name.is_empty() || m.team2.name.is_empty() || is_void(&m.status) {
            continue;
        }
        let (first, second) = if m.team1.name <= m.team2.name {
            (&m.team1, &m.team2)
        } else {
            (&m.team2, &m.team1)
        };
        let tally = tallies
            .entry((first.name.clone(), second.name.clone()))
            .or_default();
        tally.matches += 1;

        if let Some(outcome) = parse_outcome(&m.status) {
            let winner = outcome.winner.trim();
            let slot = if side_matches(first, winner) {
                Some(0)
            } else if side_matches(second, winner) {
                Some(1)
            } else {
                None
            };
            if let Some(slot) = slot {
                tally.wins[slot] += 1;
                match (outcome.victory_type, outcome.margin) {
                    (Some(VictoryType::Runs), Some(m)) => tally.run_margins[slot].push(m as f64),
                    (Some(VictoryType::Wickets), Some(m)) => {
                        tally.wicket_margins[slot].push(m as f64)
                    }
                    _ => {}
                }
            }
        }
    }

    let is_fixed = |a: &str, b: &str| {
        fixed_pair.is_some_and(|(x, y)| {
            (a.eq_ignore_ascii_case(x.trim()) && b.eq_ignore_ascii_case(y.trim()))
                || (a.eq_ignore_ascii_case(y.trim()) && b.eq_ignore_ascii_case(x.trim()))
        })
    };

    let mut rows: Vec<HeadToHeadRow> = tallies
        .into_iter()
        .filter(|((a, b), t)| match fixed_pair {
            Some(_) => is_fixed(a, b),
            None => t.matches >= HEAD_TO_HEAD_MIN_MEETINGS,
        })
        .map(|((team1, team2), t)| HeadToHeadRow {
            team1,
            team2,
            matches: t.matches,
            team1_wins: t.wins[0],
            team2_wins: t.wins[1],
            team1_win_pct: percentage(t.wins[0], t.matches),
            team2_win_pct: percentage(t.wins[1], t.matches),
            team1_avg_run_margin: mean(&t.run_margins[0]),
            team1_avg_wicket_margin: mean(&t.wicket_margins[0]),
            team2_avg_run_margin: mean(&t.run_margins[1]),
            team2_avg_wicket_margin: mean(&t.wicket_margins[1]),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.matches
            .cmp(&a.matches)
            .then_with(|| a.team1.cmp(&b.team1))
            .then_with(|| a.team2.cmp(&b.team2))
    });
    rows
}
