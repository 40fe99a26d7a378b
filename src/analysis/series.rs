//! Series started in a given year (Q8).

use chrono::Datelike;

use super::table::{Cell, TableRow};
use crate::flatten::dates::{format_date, parse_date_text};
use crate::flatten::SeriesRecord;

pub const SERIES_YEAR: i32 = 2024;
pub const SERIES_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub name: String,
    pub host_country: String,
    pub match_type: String,
    pub start_date: String,
    pub total_matches: u32,
}

impl TableRow for SeriesRow {
    const COLUMNS: &'static [&'static str] = &[
        "Series Name",
        "Host Country",
        "Match Type",
        "Start Date",
        "Total Matches Planned",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.name.as_str().into(),
            self.host_country.as_str().into(),
            self.match_type.as_str().into(),
            self.start_date.as_str().into(),
            self.total_matches.into(),
        ]
    }
}

/// Q8: the first `limit` series, in source order, whose start date falls
/// in `year`. Rows without a readable date are skipped.
pub fn series_started_in(records: &[SeriesRecord], year: i32, limit: usize) -> Vec<SeriesRow> {
    records
        .iter()
        .filter_map(|r| {
            let start = parse_date_text(&r.start_date)?;
            (start.year() == year).then(|| SeriesRow {
                name: r.series_name.clone(),
                host_country: r.host_country.clone(),
                match_type: r.match_type.clone(),
                start_date: format_date(Some(&start)),
                total_matches: r.total_matches,
            })
        })
        .take(limit)
        .collect()
}
