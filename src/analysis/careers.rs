//! Queries over career stat tables (`player_{id}_{batting,bowling}.json`).

use std::cmp::Ordering;

use super::stats::mean;
use super::table::{Cell, TableRow};
use crate::cli::types::MatchFormat;
use crate::flatten::CareerTable;

pub const TOP_TEN: usize = 10;

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, PartialEq)]
pub struct OdiScorerRow {
    pub player: String,
    pub runs: f64,
    pub average: f64,
    pub centuries: f64,
}

impl TableRow for OdiScorerRow {
    const COLUMNS: &'static [&'static str] = &["Player", "Runs", "Average", "Centuries"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            (self.runs as i64).into(),
            self.average.into(),
            (self.centuries as i64).into(),
        ]
    }
}

/// Q3: ODI runs above zero, top ten by runs.
pub fn top_odi_scorers(batting: &[CareerTable]) -> Vec<OdiScorerRow> {
    let mut rows: Vec<OdiScorerRow> = batting
        .iter()
        .filter_map(|t| {
            let runs = t.number("Runs", MatchFormat::ODI)?;
            (runs > 0.0).then(|| OdiScorerRow {
                player: t.player_name.clone(),
                runs,
                average: t.number("Average", MatchFormat::ODI).unwrap_or(0.0),
                centuries: t.number("100s", MatchFormat::ODI).unwrap_or(0.0),
            })
        })
        .collect();
    rows.sort_by(|a, b| desc(a.runs, b.runs).then_with(|| a.player.cmp(&b.player)));
    rows.truncate(TOP_TEN);
    rows
}

pub const ALLROUNDER_MIN_RUNS: f64 = 1000.0;
pub const ALLROUNDER_MIN_WICKETS: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AllRounderRow {
    pub player: String,
    pub format: MatchFormat,
    pub runs: f64,
    pub wickets: f64,
}

impl TableRow for AllRounderRow {
    const COLUMNS: &'static [&'static str] = &["Player", "Format", "Total Runs", "Total Wickets"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            self.format.to_string().into(),
            (self.runs as i64).into(),
            (self.wickets as i64).into(),
        ]
    }
}

/// Q9: per (batting, bowling) pair, every format clearing both the run
/// and the wicket threshold. Sorted by player then format.
pub fn allrounders(careers: &[(CareerTable, CareerTable)]) -> Vec<AllRounderRow> {
    let mut rows = Vec::new();
    for (batting, bowling) in careers {
        for format in batting.formats() {
            let runs = batting.number("Runs", format).unwrap_or(0.0);
            let wickets = bowling.number("Wickets", format).unwrap_or(0.0);
            if runs > ALLROUNDER_MIN_RUNS && wickets > ALLROUNDER_MIN_WICKETS {
                rows.push(AllRounderRow {
                    player: batting.player_name.clone(),
                    format,
                    runs,
                    wickets,
                });
            }
        }
    }
    rows.sort_by(|a, b| a.player.cmp(&b.player).then_with(|| a.format.cmp(&b.format)));
    rows.dedup();
    rows
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatComparisonRow {
    pub player: String,
    pub test_runs: f64,
    pub odi_runs: f64,
    pub t20i_runs: f64,
    pub overall_average: f64,
}

impl TableRow for FormatComparisonRow {
    const COLUMNS: &'static [&'static str] =
        &["Player", "Test Runs", "ODI Runs", "T20I Runs", "Overall Avg"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            (self.test_runs as i64).into(),
            (self.odi_runs as i64).into(),
            (self.t20i_runs as i64).into(),
            self.overall_average.into(),
        ]
    }
}

/// Q11: players with at least two of Test/ODI/T20I. The overall average
/// is the mean of the averages that parse.
pub fn format_comparison(batting: &[CareerTable]) -> Vec<FormatComparisonRow> {
    batting
        .iter()
        .filter(|t| MatchFormat::ALL.iter().filter(|f| t.has_format(**f)).count() >= 2)
        .map(|t| {
            let runs = |f| t.number("Runs", f).unwrap_or(0.0);
            let averages: Vec<f64> = MatchFormat::ALL
                .iter()
                .filter_map(|f| t.number("Average", *f))
                .collect();
            FormatComparisonRow {
                player: t.player_name.clone(),
                test_runs: runs(MatchFormat::Test),
                odi_runs: runs(MatchFormat::ODI),
                t20i_runs: runs(MatchFormat::T20I),
                overall_average: mean(&averages).unwrap_or(0.0),
            }
        })
        .collect()
}

pub const ECONOMY_MIN_MATCHES: f64 = 10.0;
pub const ECONOMY_MIN_OVERS_PER_MATCH: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct EconomyRow {
    pub bowler: String,
    pub format: MatchFormat,
    pub matches: f64,
    pub wickets: f64,
    pub economy: f64,
}

impl TableRow for EconomyRow {
    const COLUMNS: &'static [&'static str] = &["Bowler", "Format", "Matches", "Wickets", "Economy"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.bowler.as_str().into(),
            self.format.to_string().into(),
            (self.matches as i64).into(),
            (self.wickets as i64).into(),
            self.economy.into(),
        ]
    }
}

/// Q18: ODI and T20I bowling with at least ten matches (and two overs a
/// match when balls are recorded), cheapest first.
pub fn economical_bowlers(bowling: &[CareerTable]) -> Vec<EconomyRow> {
    let mut rows = Vec::new();
    for table in bowling {
        for format in [MatchFormat::ODI, MatchFormat::T20I] {
            let Some(matches) = table.number_containing("mat", format) else {
                continue;
            };
            let Some(economy) = table.number_containing("eco", format) else {
                continue;
            };
            if matches < ECONOMY_MIN_MATCHES || economy <= 0.0 {
                continue;
            }
            if let Some(balls) = table.number("Balls", format).filter(|b| *b > 0.0) {
                if balls / 6.0 / matches < ECONOMY_MIN_OVERS_PER_MATCH {
                    continue;
                }
            }
            rows.push(EconomyRow {
                bowler: table.player_name.clone(),
                format,
                matches,
                wickets: table.number("Wickets", format).unwrap_or(0.0),
                economy,
            });
        }
    }
    rows.sort_by(|a, b| {
        a.economy
            .partial_cmp(&b.economy)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.bowler.cmp(&b.bowler))
            .then_with(|| a.format.cmp(&b.format))
    });
    rows.truncate(TOP_TEN);
    rows
}

pub const PIVOT_MIN_TOTAL_MATCHES: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FormatPivotRow {
    pub player: String,
    /// Matches per format in `MatchFormat::ALL` order.
    pub matches: [f64; 3],
    pub averages: [f64; 3],
    pub total_matches: f64,
}

impl TableRow for FormatPivotRow {
    const COLUMNS: &'static [&'static str] = &[
        "Player",
        "Test Matches",
        "ODI Matches",
        "T20I Matches",
        "Test Avg",
        "ODI Avg",
        "T20I Avg",
        "Total Matches",
    ];

    fn cells(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = vec![self.player.as_str().into()];
        cells.extend(self.matches.iter().map(|m| Cell::from(*m as i64)));
        cells.extend(self.averages.iter().map(|a| Cell::from(*a)));
        cells.push((self.total_matches as i64).into());
        cells
    }
}

/// Q20: matches and batting average per format for players with at
/// least 20 matches overall.
pub fn format_pivot(batting: &[CareerTable]) -> Vec<FormatPivotRow> {
    let mut rows: Vec<FormatPivotRow> = batting
        .iter()
        .map(|t| {
            let matches = MatchFormat::ALL.map(|f| t.number("Matches", f).unwrap_or(0.0));
            let averages = MatchFormat::ALL.map(|f| t.number("Average", f).unwrap_or(0.0));
            FormatPivotRow {
                player: t.player_name.clone(),
                matches,
                averages,
                total_matches: matches.iter().sum(),
            }
        })
        .filter(|r| r.total_matches >= PIVOT_MIN_TOTAL_MATCHES)
        .collect();
    rows.sort_by(|a, b| {
        desc(a.total_matches, b.total_matches).then_with(|| a.player.cmp(&b.player))
    });
    rows
}

pub const COMPOSITE_MIN_RUNS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRow {
    pub player: String,
    pub score: f64,
    pub runs: f64,
    pub average: f64,
    pub strike_rate: f64,
}

impl TableRow for CompositeRow {
    const COLUMNS: &'static [&'static str] =
        &["Player", "Composite Score", "Runs", "Average", "Strike Rate"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            self.score.into(),
            (self.runs as i64).into(),
            self.average.into(),
            self.strike_rate.into(),
        ]
    }
}

/// Weighted ODI batting score.
pub fn composite_score(average: f64, strike_rate: f64, runs: f64) -> f64 {
    average * 0.5 + strike_rate * 0.4 + runs / 5000.0 * 0.1
}

/// Q21: top ten ODI batters by composite score, runs above 100.
pub fn composite_ranking(batting: &[CareerTable]) -> Vec<CompositeRow> {
    let mut rows: Vec<CompositeRow> = batting
        .iter()
        .filter_map(|t| {
            let runs = t.number("Runs", MatchFormat::ODI)?;
            if runs <= COMPOSITE_MIN_RUNS {
                return None;
            }
            let average = t.number("Average", MatchFormat::ODI).unwrap_or(0.0);
            let strike_rate = t.number("SR", MatchFormat::ODI).unwrap_or(0.0);
            Some(CompositeRow {
                player: t.player_name.clone(),
                score: composite_score(average, strike_rate, runs),
                runs,
                average,
                strike_rate,
            })
        })
        .collect();
    rows.sort_by(|a, b| desc(a.score, b.score).then_with(|| a.player.cmp(&b.player)));
    rows.truncate(TOP_TEN);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn table(name: &str, headers: &[&str], rows: &[&[&str]]) -> CareerTable {
        let mut all_headers = vec!["ROWHEADER"];
        all_headers.extend_from_slice(headers);
        let values: Vec<Value> = rows.iter().map(|r| json!({"values": r})).collect();
        let root = json!({
            "headers": all_headers,
            "values": values,
            "appIndex": {"seoTitle": format!("{} Profile - Cricbuzz", name)}
        });
        CareerTable::from_json(None, &root).unwrap()
    }

    #[test]
    fn test_top_odi_scorers() {
        let tables = vec![
            table("A", &["Test", "ODI"], &[&["Runs", "500", "1200"], &["Average", "40", "45.5"], &["100s", "1", "3"]]),
            table("B", &["ODI"], &[&["Runs", "3000"], &["Average", "-"]]),
            table("C", &["ODI"], &[&["Runs", "0"]]),
            table("D", &["Test"], &[&["Runs", "9000"]]),
        ];
        let rows = top_odi_scorers(&tables);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "B");
        assert_eq!(rows[0].average, 0.0);
        assert_eq!(rows[1].centuries, 3.0);
    }

    #[test]
    fn test_allrounders_thresholds_per_format() {
        let batting = table("Jadeja", &["Test", "ODI", "T20"], &[&["Runs", "3000", "2700", "500"]]);
        let bowling = table("Jadeja", &["Test", "ODI", "T20"], &[&["Wickets", "290", "50", "60"]]);
        let rows = allrounders(&[(batting, bowling)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].format, MatchFormat::Test);
        assert_eq!(rows[0].wickets, 290.0);
    }

    #[test]
    fn test_format_comparison_needs_two_formats() {
        let tables = vec![
            table("Two", &["Test", "T20"], &[&["Runs", "100", "200"], &["Average", "20", "N/A"]]),
            table("One", &["ODI"], &[&["Runs", "5000"], &["Average", "50"]]),
            table("Three", &["Test", "ODI", "T20"], &[&["Runs", "1", "2", "3"], &["Average", "10", "20", "30"]]),
        ];
        let rows = format_comparison(&tables);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "Two");
        assert_eq!(rows[0].odi_runs, 0.0);
        assert_eq!(rows[0].t20i_runs, 200.0);
        assert_eq!(rows[0].overall_average, 20.0);
        assert_eq!(rows[1].overall_average, 20.0);
    }

    #[test]
    fn test_economical_bowlers_filters_and_order() {
        let tables = vec![
            table("Cheap", &["ODI", "T20"], &[&["Matches", "20", "9"], &["Balls", "600", "200"], &["Wickets", "30", "10"], &["Eco", "4.10", "6.0"]]),
            table("Light", &["ODI"], &[&["Matches", "20"], &["Balls", "60"], &["Eco", "3.0"]]),
            table("Dear", &["T20"], &[&["Matches", "40"], &["Economy", "8.25"]]),
        ];
        let rows = economical_bowlers(&tables);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bowler, "Cheap");
        assert_eq!(rows[0].format, MatchFormat::ODI);
        assert_eq!(rows[1].bowler, "Dear");
        assert_eq!(rows[1].format, MatchFormat::T20I);
    }

    #[test]
    fn test_format_pivot_total_threshold() {
        let tables = vec![
            table("Regular", &["Test", "ODI", "T20"], &[&["Matches", "10", "8", "4"], &["Average", "40", "35.5", "-"]]),
            table("Rare", &["ODI"], &[&["Matches", "19"]]),
        ];
        let rows = format_pivot(&tables);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_matches, 22.0);
        assert_eq!(rows[0].averages, [40.0, 35.5, 0.0]);
        assert_eq!(rows[0].cells().len(), FormatPivotRow::COLUMNS.len());
    }

    #[test]
    fn test_composite_ranking() {
        assert!((composite_score(50.0, 100.0, 5000.0) - 65.1).abs() < 1e-9);
        let tables = vec![
            table("Anchor", &["ODI"], &[&["Runs", "10000"], &["Average", "55"], &["SR", "85"]]),
            table("Hitter", &["ODI"], &[&["Runs", "4000"], &["Average", "35"], &["SR", "120"]]),
            table("Rookie", &["ODI"], &[&["Runs", "100"], &["Average", "100"], &["SR", "200"]]),
        ];
        let rows = composite_ranking(&tables);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "Hitter");
        assert!((rows[0].score - 65.58).abs() < 1e-9);
        assert_eq!(rows[1].player, "Anchor");
        assert!((rows[1].score - 61.7).abs() < 1e-9);
    }
}
