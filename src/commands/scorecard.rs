//! `scorecard <MATCH_ID>`

use crate::{
    analysis::{Cell, QueryTable, TableRow},
    cli::types::MatchId,
    cricbuzz::sources::load_or_fetch_scorecard,
    flatten::{format_date, InningsBattingEntry, InningsBowlingEntry, Scorecard},
    CricketError, Result,
};

use super::common::{print_table, CommandContext, OutputFormat};

impl TableRow for InningsBattingEntry {
    const COLUMNS: &'static [&'static str] =
        &["Batter", "Dismissal", "R", "B", "4s", "6s", "SR"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            self.dismissal.as_str().into(),
            self.runs.into(),
            self.balls.into(),
            self.fours.into(),
            self.sixes.into(),
            self.strike_rate.into(),
        ]
    }
}

impl TableRow for InningsBowlingEntry {
    const COLUMNS: &'static [&'static str] = &["Bowler", "O", "M", "R", "W", "Econ"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player.as_str().into(),
            self.overs.into(),
            self.maidens.into(),
            self.runs.into(),
            self.wickets.into(),
            self.economy.into(),
        ]
    }
}

/// Header line plus a batting and a bowling table per innings.
pub fn scorecard_tables(card: &Scorecard) -> (String, Vec<QueryTable>) {
    let mut header = format!("Match {}", card.match_id);
    if let Some(format) = &card.format {
        header.push_str(&format!(" | {}", format));
    }
    if let Some(venue) = &card.venue {
        header.push_str(&format!(" | {}", venue));
    }
    header.push_str(&format!(" | {}", format_date(card.start_date.as_ref())));
    if !card.status.is_empty() {
        header.push_str(&format!("\n{}", card.status));
    }

    let mut tables = Vec::new();
    for innings in &card.innings {
        let title = format!(
            "Innings {}: {} {}/{} ({} ov)",
            innings.innings_id, innings.batting_team, innings.score, innings.wickets, innings.overs
        );
        tables.push(QueryTable::from_rows(title.clone(), &innings.batting));
        tables.push(QueryTable::from_rows(format!("{} - bowling", title), &innings.bowling));
    }
    (header, tables)
}

/// Handle the scorecard command
pub async fn handle_scorecard(
    ctx: &CommandContext,
    match_id: MatchId,
    format: OutputFormat,
) -> Result<()> {
    let card = load_or_fetch_scorecard(&ctx.client, &ctx.store, match_id)
        .await?
        .ok_or(CricketError::NoData)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&card)?);
        return Ok(());
    }

    let (header, tables) = scorecard_tables(&card);
    println!("{}\n", header);
    for table in &tables {
        print_table(table, format)?;
        println!();
    }
    Ok(())
}
