//! `query list | run | all`: load the records a query needs and run its
//! aggregator.

use crate::{
    analysis::{
        batting, bowling, careers, matches, parse_outcome, partnerships, players, series,
        timeseries, toss, venues, QueryId, QueryTable,
    },
    cli::types::{CareerKind, SeriesId, TeamId},
    core::SnapshotKey,
    cricbuzz::sources,
    flatten::{MatchRecord, Scorecard},
    CricketError, Result,
};

use super::common::{print_table, CommandContext, OutputFormat};

pub const DEFAULT_TEAM_ID: u64 = 2;
pub const DEFAULT_SERIES_ID: u64 = 6732;

/// Inputs a few queries take from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    /// Team for Q1.
    pub team_id: TeamId,
    /// Series for Q12.
    pub series_id: SeriesId,
    /// Fixed pair for Q22.
    pub teams: Option<(String, String)>,
    /// Delete the query's snapshot before running.
    pub refresh: bool,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            team_id: TeamId::new(DEFAULT_TEAM_ID),
            series_id: SeriesId::new(DEFAULT_SERIES_ID),
            teams: None,
            refresh: false,
        }
    }
}

/// The snapshot `--refresh` removes for a query, if it has one that the
/// network path can rebuild.
pub fn refresh_key(id: QueryId, params: &QueryParams) -> Option<SnapshotKey> {
    match id.number() {
        2 | 5 | 10 | 15 | 22 => Some(SnapshotKey::RecentMatches),
        4 => Some(SnapshotKey::Venues),
        9 => Some(SnapshotKey::QueryAnswer(9)),
        12 => Some(SnapshotKey::Series(params.series_id)),
        _ => None,
    }
}

/// Run one query and return its table.
pub async fn run_query(
    ctx: &CommandContext,
    id: QueryId,
    params: &QueryParams,
) -> Result<QueryTable> {
    if params.refresh {
        if let Some(key) = refresh_key(id, params) {
            if ctx.store.invalidate(&key)? {
                log::info!("{}: removed {}", id, key.file_name());
            }
        }
    }

    let client = &ctx.client;
    let store = &ctx.store;
    let title = format!("{}. {}", id.number(), id.title());

    let table = match id.number() {
        1 => {
            let squad = sources::fetch_team_players(client, params.team_id).await;
            QueryTable::from_rows(title, &players::team_player_rows(&squad))
        }
        2 => {
            let recent = sources::load_or_fetch_recent_matches(client, store).await?;
            QueryTable::from_rows(title, &matches::recent_match_rows(&recent))
        }
        3 => {
            let tables = sources::stored_career_tables(store, CareerKind::Batting)?;
            QueryTable::from_rows(title, &careers::top_odi_scorers(&tables))
        }
        4 => {
            let venue_ids = if store.exists(&SnapshotKey::Venues) {
                Vec::new()
            } else {
                let recent = sources::load_or_fetch_recent_matches(client, store).await?;
                sources::venue_ids(&recent)
            };
            let records = sources::load_or_fetch_venues(client, store, &venue_ids).await?;
            QueryTable::from_rows(
                title,
                &venues::large_venues(&records, venues::LARGE_VENUE_CAPACITY),
            )
        }
        5 => {
            let recent = sources::load_or_fetch_recent_matches(client, store).await?;
            QueryTable::from_rows(title, &matches::team_wins(&recent))
        }
        6 => {
            let everyone = sources::fetch_international_players(client, None).await;
            QueryTable::from_rows(title, &players::role_counts(&everyone))
        }
        7 => {
            let cards = sources::stored_scorecards(store)?;
            QueryTable::from_rows(title, &batting::highest_scores_by_format(&cards))
        }
        8 => {
            let records = sources::stored_series(store)?;
            QueryTable::from_rows(
                title,
                &series::series_started_in(&records, series::SERIES_YEAR, series::SERIES_LIMIT),
            )
        }
        9 => allrounder_answer(ctx, title).await?,
        10 => {
            let recent = sources::load_or_fetch_recent_matches(client, store).await?;
            QueryTable::from_rows(
                title,
                &matches::completed_matches(&recent, matches::COMPLETED_MATCH_LIMIT),
            )
        }
        11 => {
            let tables = sources::stored_career_tables(store, CareerKind::Batting)?;
            QueryTable::from_rows(title, &careers::format_comparison(&tables))
        }
        12 => {
            let fixtures =
                sources::load_or_fetch_series_matches(client, store, params.series_id).await?;
            let countries = sources::fetch_series_venue_countries(client, &fixtures).await;
            QueryTable::from_rows(title, &venues::home_away_wins(&fixtures, &countries))
        }
        13 => {
            let cards = sources::stored_scorecards(store)?;
            QueryTable::from_rows(title, &partnerships::century_partnerships(&cards))
        }
        14 => {
            let cards = sources::stored_scorecards(store)?;
            QueryTable::from_rows(title, &bowling::bowler_venue_performance(&cards))
        }
        15 => {
            let recent = sources::load_or_fetch_recent_matches(client, store).await?;
            let cards = close_match_scorecards(ctx, &recent).await?;
            QueryTable::from_rows(title, &batting::close_match_performers(&recent, &cards))
        }
        16 => {
            let cards = sources::stored_scorecards(store)?;
            QueryTable::from_rows(
                title,
                &batting::yearly_batting(&cards, batting::YEARLY_SINCE),
            )
        }
        17 => toss::toss_advantage(&sources::stored_toss_records(store)?).into_table(&title),
        18 => {
            let bowling_tables = sources::stored_career_tables(store, CareerKind::Bowling)?;
            QueryTable::from_rows(title, &careers::economical_bowlers(&bowling_tables))
        }
        19 => {
            let cards = sources::stored_scorecards(store)?;
            QueryTable::from_rows(title, &batting::batting_consistency(&cards))
        }
        20 => {
            let tables = sources::stored_career_tables(store, CareerKind::Batting)?;
            QueryTable::from_rows(title, &careers::format_pivot(&tables))
        }
        21 => {
            let tables = sources::stored_career_tables(store, CareerKind::Batting)?;
            QueryTable::from_rows(title, &careers::composite_ranking(&tables))
        }
        22 => {
            let recent = sources::load_or_fetch_recent_matches(client, store).await?;
            let pair = params
                .teams
                .as_ref()
                .map(|(a, b)| (a.as_str(), b.as_str()));
            QueryTable::from_rows(title, &matches::head_to_head(&recent, pair))
        }
        23 => {
            let cards = sources::stored_scorecards(store)?;
            QueryTable::from_rows(title, &batting::player_form(&cards))
        }
        24 => {
            let cards = sources::stored_scorecards(store)?;
            QueryTable::from_rows(title, &partnerships::partnership_success(&cards))
        }
        25 => {
            let cards = sources::stored_scorecards(store)?;
            QueryTable::from_rows(title, &timeseries::career_phases(&cards))
        }
        number => return Err(CricketError::UnknownQuery { number }),
    };

    log::debug!("{} produced {} rows", id, table.len());
    Ok(table)
}

/// Q9 is expensive (dozens of requests), so its answer is kept as
/// `question9_answer.csv` and reused.
async fn allrounder_answer(ctx: &CommandContext, title: String) -> Result<QueryTable> {
    let key = SnapshotKey::QueryAnswer(9);
    if let Some(text) = ctx.store.load_text(&key)? {
        log::debug!("using cached answer {}", key.file_name());
        return QueryTable::from_csv(title, &text);
    }

    let pairs = sources::fetch_allrounder_careers(&ctx.client, &ctx.store).await?;
    let table = QueryTable::from_rows(title, &careers::allrounders(&pairs));
    if !table.is_empty() {
        ctx.store.store_text(&key, &table.to_csv()?)?;
    }
    Ok(table)
}

/// Scorecards of the recent matches decided by a close margin. A rate
/// limit stops the fetching; the scorecards loaded so far are kept.
async fn close_match_scorecards(
    ctx: &CommandContext,
    recent: &[MatchRecord],
) -> Result<Vec<Scorecard>> {
    let mut cards = Vec::new();
    for m in recent {
        let close = parse_outcome(&m.status).is_some_and(|o| o.is_close());
        if !close {
            continue;
        }
        if !ctx.store.exists(&SnapshotKey::Match(m.match_id)) {
            ctx.client.pause().await;
        }
        match sources::load_or_fetch_scorecard(&ctx.client, &ctx.store, m.match_id).await {
            Ok(card) => cards.extend(card),
            Err(CricketError::RateLimited) => {
                log::warn!(
                    "rate limited at match {}; using {} close-match scorecards",
                    m.match_id,
                    cards.len()
                );
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(cards)
}

/// Outcome of one query inside `query all`.
#[derive(Debug)]
pub struct QueryReport {
    pub id: QueryId,
    pub result: Result<QueryTable>,
}

impl QueryReport {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every query in order. A failing query is recorded in its own
/// report; the others still run.
pub async fn run_all(ctx: &CommandContext, params: &QueryParams) -> Vec<QueryReport> {
    let mut reports = Vec::new();
    for id in QueryId::all() {
        let result = run_query(ctx, id, params).await;
        if let Err(e) = &result {
            log::warn!("{} failed: {}", id, e);
        }
        reports.push(QueryReport { id, result });
    }
    reports
}

/// One line per failed query, or `None` when every query succeeded.
pub fn failure_summary(reports: &[QueryReport]) -> Option<String> {
    let failures: Vec<String> = reports
        .iter()
        .filter_map(|r| match &r.result {
            Err(e) => Some(format!("  {} ({}): {}", r.id, r.id.title(), e)),
            Ok(_) => None,
        })
        .collect();
    if failures.is_empty() {
        return None;
    }
    Some(format!(
        "{} of {} queries failed:\n{}",
        failures.len(),
        reports.len(),
        failures.join("\n")
    ))
}

/// Handle `query list`
pub fn handle_query_list() {
    for id in QueryId::all() {
        println!("{:>2}  {}", id.number(), id.title());
    }
}

/// Handle `query run`
pub async fn handle_query_run(
    ctx: &CommandContext,
    id: QueryId,
    params: &QueryParams,
    format: OutputFormat,
) -> Result<()> {
    let table = run_query(ctx, id, params).await?;
    print_table(&table, format)
}

/// Handle `query all`: every table, then a failure summary. Failures do
/// not make the command fail.
pub async fn handle_query_all(
    ctx: &CommandContext,
    params: &QueryParams,
    format: OutputFormat,
) -> Result<()> {
    let reports = run_all(ctx, params).await;
    for report in &reports {
        match &report.result {
            Ok(table) => print_table(table, format)?,
            Err(e) => println!("{}. {}\n⚠ failed: {}", report.id.number(), report.id.title(), e),
        }
        if format == OutputFormat::Text {
            println!();
        }
    }

    match failure_summary(&reports) {
        Some(summary) => eprintln!("{}", summary),
        None => println!("✓ All {} queries completed", reports.len()),
    }
    Ok(())
}
