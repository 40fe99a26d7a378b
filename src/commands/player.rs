//! `player search <NAME>` and `player stats <PLAYER_ID>`

use crate::{
    analysis::{Cell, QueryTable, TableRow},
    cli::types::{CareerKind, PlayerId},
    cricbuzz::sources::load_or_fetch_career,
    flatten::{flatten_player_search, CareerTable, PlayerSearchHit},
    CricketError, Result,
};

use super::common::{print_table, CommandContext, OutputFormat};

impl TableRow for PlayerSearchHit {
    const COLUMNS: &'static [&'static str] = &["Player ID", "Name", "Team"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.player_id.as_u64().into(),
            self.name.as_str().into(),
            self.team_name.clone().into(),
        ]
    }
}

/// Players matching `name`; no match is a [`CricketError::PlayerNotFound`].
pub async fn search_players(ctx: &CommandContext, name: &str) -> Result<Vec<PlayerSearchHit>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CricketError::InvalidInput {
            message: "Player name cannot be empty".to_string(),
        });
    }

    let hits = ctx
        .client
        .search_player(name)
        .await
        .into_data()
        .map(|root| flatten_player_search(&root))
        .unwrap_or_default();
    if hits.is_empty() {
        return Err(CricketError::PlayerNotFound {
            name: name.to_string(),
        });
    }
    Ok(hits)
}

/// Career table as rows of its header; rows whose length differs from
/// the header are left out.
pub fn career_table(title: &str, table: &CareerTable) -> QueryTable {
    let columns: Vec<&str> = table.headers.iter().map(String::as_str).collect();
    let mut out = QueryTable::new(title, &columns);
    for record in table.records() {
        out.push_row(
            table
                .headers
                .iter()
                .map(|h| record.get(h).map(|v| Cell::parse(v)).unwrap_or(Cell::Empty))
                .collect(),
        );
    }
    out
}

/// Handle `player search`
pub async fn handle_player_search(
    ctx: &CommandContext,
    name: &str,
    format: OutputFormat,
) -> Result<()> {
    let hits = search_players(ctx, name).await?;
    print_table(&QueryTable::from_rows(format!("Players matching \"{}\"", name.trim()), &hits), format)
}

/// Handle `player stats`
pub async fn handle_player_stats(
    ctx: &CommandContext,
    player_id: PlayerId,
    format: OutputFormat,
) -> Result<()> {
    let batting = load_or_fetch_career(&ctx.client, &ctx.store, player_id, CareerKind::Batting).await?;
    let bowling = load_or_fetch_career(&ctx.client, &ctx.store, player_id, CareerKind::Bowling).await?;
    if batting.is_none() && bowling.is_none() {
        return Err(CricketError::PlayerNotFound {
            name: player_id.to_string(),
        });
    }

    if format == OutputFormat::Json {
        let records = serde_json::json!({
            "player_id": player_id.as_u64(),
            "batting": batting.as_ref().map(CareerTable::records),
            "bowling": bowling.as_ref().map(CareerTable::records),
        });
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let name = batting
        .as_ref()
        .or(bowling.as_ref())
        .map(|t| t.player_name.clone())
        .unwrap_or_default();
    for (label, table) in [("Batting", &batting), ("Bowling", &bowling)] {
        if let Some(table) = table {
            print_table(&career_table(&format!("{} - {} career", name, label), table), format)?;
            println!();
        }
    }
    Ok(())
}
