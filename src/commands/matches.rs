//! `matches live|recent|upcoming`

use serde::Serialize;

use crate::{
    analysis::{Cell, QueryTable, TableRow},
    cli::types::MatchListing,
    cricbuzz::sources::match_listing,
    flatten::{format_date, MatchRecord},
    Result,
};

use super::common::{print_table, CommandContext, OutputFormat};

/// A match as listed on the command line; scores only appear for live
/// and finished matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRow {
    pub match_id: u64,
    pub description: String,
    pub series: String,
    pub format: String,
    pub date: String,
    pub team1: String,
    pub team1_score: Option<String>,
    pub team2: String,
    pub team2_score: Option<String>,
    pub venue: String,
    pub status: String,
}

impl From<&MatchRecord> for ListingRow {
    fn from(m: &MatchRecord) -> Self {
        let scores = m.scores.clone().unwrap_or_default();
        Self {
            match_id: m.match_id.as_u64(),
            description: m.description.clone(),
            series: m.series_name.clone(),
            format: m.format.clone(),
            date: format_date(m.start_date.as_ref()),
            team1: m.team1.name.clone(),
            team1_score: scores.team1.map(|s| s.display()),
            team2: m.team2.name.clone(),
            team2_score: scores.team2.map(|s| s.display()),
            venue: m.venue.display(),
            status: m.status.clone(),
        }
    }
}

impl TableRow for ListingRow {
    const COLUMNS: &'static [&'static str] = &[
        "Match ID", "Match", "Series", "Format", "Date", "Team 1", "Score", "Team 2", "Score",
        "Venue", "Status",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.match_id.into(),
            self.description.as_str().into(),
            self.series.as_str().into(),
            self.format.as_str().into(),
            self.date.as_str().into(),
            self.team1.as_str().into(),
            self.team1_score.clone().into(),
            self.team2.as_str().into(),
            self.team2_score.clone().into(),
            self.venue.as_str().into(),
            self.status.as_str().into(),
        ]
    }
}

fn listing_title(listing: MatchListing) -> &'static str {
    match listing {
        MatchListing::Live => "Live matches",
        MatchListing::Recent => "Recent matches",
        MatchListing::Upcoming => "Upcoming matches",
    }
}

/// Rows for a listing in display order.
pub async fn listing_rows(ctx: &CommandContext, listing: MatchListing) -> Result<Vec<ListingRow>> {
    let records = match_listing(&ctx.client, &ctx.store, listing).await?;
    Ok(records.iter().map(ListingRow::from).collect())
}

/// Handle the matches command
pub async fn handle_matches(
    ctx: &CommandContext,
    listing: MatchListing,
    format: OutputFormat,
) -> Result<()> {
    let rows = listing_rows(ctx, listing).await?;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    print_table(&QueryTable::from_rows(listing_title(listing), &rows), format)
}
