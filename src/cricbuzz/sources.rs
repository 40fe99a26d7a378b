//! Load-or-fetch access to every data set the queries read.
//!
//! Snapshot first: an existing file under the data directory is always
//! used. Otherwise the API is called and a non-empty result is written
//! back. Bulk loops pause before each request and stop at the first 429.

use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

use super::http::{CricbuzzClient, FetchOutcome};
use crate::analysis::venues::venue_countries;
use crate::cli::types::{CareerKind, MatchId, MatchListing, PlayerId, SeriesId, TeamId, VenueId};
use crate::core::{SnapshotKey, SnapshotStore};
use crate::flatten::{
    field, flatten_international_teams, flatten_matches, flatten_scorecard, flatten_series_matches,
    flatten_series_venues, flatten_team_players, flatten_toss_cache, flatten_venue,
    parse_epoch_millis, sort_by_date, CareerTable, MatchRecord, PlayerRecord, Scorecard,
    SeriesRecord, TossRecord, VenueRecord,
};
use crate::{CricketError, Result};


/// Recent matches from `recent_matches.json`, fetched when absent.
pub async fn load_or_fetch_recent_matches(
    client: &CricbuzzClient,
    store: &SnapshotStore,
) -> Result<Vec<MatchRecord>> {
    if let Some(root) = store.load_json(&SnapshotKey::RecentMatches)? {
        return Ok(flatten_matches(&root));
    }

    let Some(root) = client.matches(MatchListing::Recent).await.into_data() else {
        return Ok(Vec::new());
    };
    let records = flatten_matches(&root);
    if !records.is_empty() {
        store.store_json(&SnapshotKey::RecentMatches, &root)?;
    }
    Ok(records)
}

/// Live or upcoming listings are never cached; recent goes through the
/// snapshot. Sorted per the listing's direction, undated last.
pub async fn match_listing(
    client: &CricbuzzClient,
    store: &SnapshotStore,
    listing: MatchListing,
) -> Result<Vec<MatchRecord>> {
    let mut records = match listing {
        MatchListing::Recent => load_or_fetch_recent_matches(client, store).await?,
        other => client
            .matches(other)
            .await
            .into_data()
            .map(|root| flatten_matches(&root))
            .unwrap_or_default(),
    };
    sort_by_date(&mut records, |m| m.start_date, listing.most_recent_first());
    Ok(records)
}

/// Scorecard for one match. A fetched scorecard is stored as
/// `match_{id}.json` with the match info merged in under `matchInfo`; the
/// info response itself goes to `matchinfo_{id}.json`.
pub async fn load_or_fetch_scorecard(
    client: &CricbuzzClient,
    store: &SnapshotStore,
    match_id: MatchId,
) -> Result<Option<Scorecard>> {
    if let Some(root) = store.load_json(&SnapshotKey::Match(match_id))? {
        let info = store.load_json(&SnapshotKey::MatchInfo(match_id))?;
        return Ok(Some(with_match_info(flatten_scorecard(match_id, &root), info.as_ref())));
    }

    let mut root = match client.match_scorecard(match_id).await {
        FetchOutcome::Data(root) => root,
        FetchOutcome::RateLimited => return Err(CricketError::RateLimited),
        FetchOutcome::Empty { .. } => return Ok(None),
    };

    let info = client.match_info(match_id).await.into_data();
    if let Some(info) = &info {
        store.store_json(&SnapshotKey::MatchInfo(match_id), info)?;
        if root.get("matchInfo").is_none() {
            if let (Some(obj), Some(node)) = (root.as_object_mut(), info_node(info)) {
                obj.insert("matchInfo".to_string(), node.clone());
            }
        }
    }

    let card = flatten_scorecard(match_id, &root);
    if !card.innings.is_empty() {
        store.store_json(&SnapshotKey::Match(match_id), &root)?;
    }
    Ok(Some(with_match_info(card, info.as_ref())))
}

/// Every stored scorecard, ascending by match id, with dates, format and
/// venue filled from `matchinfo_{id}.json` where the scorecard lacks them.
pub fn stored_scorecards(store: &SnapshotStore) -> Result<Vec<Scorecard>> {
    let mut cards = Vec::new();
    for match_id in store.match_ids()? {
        let Some(root) = store.load_json(&SnapshotKey::Match(match_id))? else {
            continue;
        };
        let info = store.load_json(&SnapshotKey::MatchInfo(match_id))?;
        cards.push(with_match_info(flatten_scorecard(match_id, &root), info.as_ref()));
    }
    Ok(cards)
}

/// The `matchInfo`/`matchHeader` node of a match-center response, or the
/// response itself when it is already flat.
fn info_node(info: &Value) -> Option<&Value> {
    field(info, &["matchInfo", "matchHeader"]).or(Some(info).filter(|v| v.is_object()))
}

fn with_match_info(mut card: Scorecard, info: Option<&Value>) -> Scorecard {
    let Some(node) = info.and_then(info_node) else {
        return card;
    };
    let root = info.unwrap_or(node);

    if card.start_date.is_none() {
        card.start_date = field(node, &["startdate", "startDate", "matchStartTimestamp"])
            .or_else(|| field(root, &["startdate", "startDate"]))
            .and_then(parse_epoch_millis);
    }
    if card.format.is_none() {
        card.format = node
            .get("matchFormat")
            .and_then(Value::as_str)
            .map(crate::cli::types::format::normalize_format_label);
    }
    if card.venue.is_none() {
        card.venue = field(node, &["venueInfo", "venue"])
            .or_else(|| root.get("venueInfo"))
            .and_then(|v| v.get("ground"))
            .and_then(Value::as_str)
            .map(str::to_string);
    }
    if card.status.is_empty() {
        if let Some(status) = node.get("status").and_then(Value::as_str) {
            card.status = status.to_string();
        }
    }
    card
}

/// Career table from `player_{id}_{kind}.json`, fetched when absent.
pub async fn load_or_fetch_career(
    client: &CricbuzzClient,
    store: &SnapshotStore,
    player_id: PlayerId,
    kind: CareerKind,
) -> Result<Option<CareerTable>> {
    let key = SnapshotKey::PlayerCareer(player_id, kind);
    if let Some(root) = store.load_json(&key)? {
        return Ok(CareerTable::from_json(Some(player_id), &root));
    }

    let Some(root) = client.player_career(player_id, kind).await.into_data() else {
        return Ok(None);
    };
    let table = CareerTable::from_json(Some(player_id), &root);
    if table.is_some() {
        store.store_json(&key, &root)?;
    }
    Ok(table)
}

/// Every stored career table of one kind, ascending by player id.
pub fn stored_career_tables(store: &SnapshotStore, kind: CareerKind) -> Result<Vec<CareerTable>> {
    let mut tables = Vec::new();
    for player_id in store.career_ids(kind)? {
        if let Some(root) = store.load_json(&SnapshotKey::PlayerCareer(player_id, kind))? {
            tables.extend(CareerTable::from_json(Some(player_id), &root));
        }
    }
    Ok(tables)
}

/// Distinct venue ids in listing order.
pub fn venue_ids(matches: &[MatchRecord]) -> Vec<VenueId> {
    let mut seen = BTreeSet::new();
    matches
        .iter()
        .filter_map(|m| m.venue.id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Venues from `venues.csv`, or fetched one by one. A 429 stops the loop
/// and whatever was collected so far is kept.
pub async fn load_or_fetch_venues(
    client: &CricbuzzClient,
    store: &SnapshotStore,
    venue_ids: &[VenueId],
) -> Result<Vec<VenueRecord>> {
    if let Some(venues) = store.load_csv::<VenueRecord>(&SnapshotKey::Venues)? {
        return Ok(venues);
    }

    let mut venues = Vec::new();
    for (done, venue_id) in venue_ids.iter().enumerate() {
        client.pause().await;
        match client.venue(*venue_id).await {
            FetchOutcome::Data(root) => venues.extend(flatten_venue(Some(*venue_id), &root)),
            FetchOutcome::RateLimited => {
                log::warn!(
                    "rate limited after {} venue requests; skipping the remaining {}",
                    done,
                    venue_ids.len() - done
                );
                break;
            }
            FetchOutcome::Empty { .. } => {}
        }
    }

    if !venues.is_empty() {
        store.store_csv(&SnapshotKey::Venues, &venues)?;
    }
    Ok(venues)
}

/// Matches of one series from `series_{id}.json`, fetched when absent.
pub async fn load_or_fetch_series_matches(
    client: &CricbuzzClient,
    store: &SnapshotStore,
    series_id: SeriesId,
) -> Result<Vec<MatchRecord>> {
    let key = SnapshotKey::Series(series_id);
    if let Some(root) = store.load_json(&key)? {
        return Ok(flatten_series_matches(&root));
    }

    let Some(root) = client.series(series_id).await.into_data() else {
        return Ok(Vec::new());
    };
    let records = flatten_series_matches(&root);
    if !records.is_empty() {
        store.store_json(&key, &root)?;
    }
    Ok(records)
}

/// Ground → country across the venue lists of every series the matches
/// belong to.
pub async fn fetch_series_venue_countries(
    client: &CricbuzzClient,
    matches: &[MatchRecord],
) -> HashMap<String, String> {
    let series: BTreeSet<SeriesId> = matches.iter().filter_map(|m| m.series_id).collect();
    let mut venues = Vec::new();
    for series_id in series {
        client.pause().await;
        match client.series_venues(series_id).await {
            FetchOutcome::Data(root) => venues.extend(flatten_series_venues(&root)),
            FetchOutcome::RateLimited => {
                log::warn!("rate limited while fetching series venues");
                break;
            }
            FetchOutcome::Empty { .. } => {}
        }
    }
    venue_countries(&venues)
}

/// `series_2024.csv` when present, else one summary row per stored
/// `series_{id}.json`.
pub fn stored_series(store: &SnapshotStore) -> Result<Vec<SeriesRecord>> {
    if let Some(rows) = store.load_csv::<SeriesRecord>(&SnapshotKey::Series2024)? {
        return Ok(rows);
    }
    let mut rows = Vec::new();
    for series_id in store.series_ids()? {
        if let Some(root) = store.load_json(&SnapshotKey::Series(series_id))? {
            rows.push(SeriesRecord::from_series_json(
                &format!("series_{}", series_id),
                &root,
            ));
        }
    }
    Ok(rows)
}

pub fn stored_toss_records(store: &SnapshotStore) -> Result<Vec<TossRecord>> {
    Ok(store
        .load_json(&SnapshotKey::TossCache)?
        .map(|root| flatten_toss_cache(&root))
        .unwrap_or_default())
}

pub async fn fetch_team_players(client: &CricbuzzClient, team_id: TeamId) -> Vec<PlayerRecord> {
    client
        .team_players(team_id)
        .await
        .into_data()
        .map(|root| flatten_team_players(&root, Some(team_id)))
        .unwrap_or_default()
}

/// Squads of the first `team_limit` international teams (all when
/// `None`), fetched sequentially.
pub async fn fetch_international_players(
    client: &CricbuzzClient,
    team_limit: Option<usize>,
) -> Vec<PlayerRecord> {
    let Some(root) = client.international_teams().await.into_data() else {
        return Vec::new();
    };
    let teams = flatten_international_teams(&root);
    let limit = team_limit.unwrap_or(teams.len());

    let mut players = Vec::new();
    for team in teams.iter().take(limit) {
        client.pause().await;
        match client.team_players(team.id).await {
            FetchOutcome::Data(root) => players.extend(flatten_team_players(&root, Some(team.id))),
            FetchOutcome::RateLimited => {
                log::warn!("rate limited while fetching squads; stopping at {}", team.name);
                break;
            }
            FetchOutcome::Empty { .. } => {}
        }
    }
    players
}

pub const ALLROUNDER_TEAM_LIMIT: usize = 5;
pub const ALLROUNDER_PLAYER_LIMIT: usize = 15;

/// Players listed under an all-rounder heading.
pub fn is_allrounder(player: &PlayerRecord) -> bool {
    player.role.to_uppercase().contains("ALL")
}

/// Batting and bowling tables for the first all-rounders found in the
/// first five international squads.
pub async fn fetch_allrounder_careers(
    client: &CricbuzzClient,
    store: &SnapshotStore,
) -> Result<Vec<(CareerTable, CareerTable)>> {
    let players = fetch_international_players(client, Some(ALLROUNDER_TEAM_LIMIT)).await;

    let mut seen = BTreeSet::new();
    let candidates: Vec<&PlayerRecord> = players
        .iter()
        .filter(|p| is_allrounder(p))
        .filter(|p| seen.insert(p.player_id))
        .take(ALLROUNDER_PLAYER_LIMIT)
        .collect();
    log::info!("fetching careers for {} all-rounders", candidates.len());

    let mut careers = Vec::new();
    for player in candidates {
        let batting = paced_career(client, store, player.player_id, CareerKind::Batting).await?;
        let bowling = paced_career(client, store, player.player_id, CareerKind::Bowling).await?;
        if let (Some(batting), Some(bowling)) = (batting, bowling) {
            careers.push((with_name(batting, &player.name), with_name(bowling, &player.name)));
        }
    }
    Ok(careers)
}

/// Pauses only when the table has to come from the API.
async fn paced_career(
    client: &CricbuzzClient,
    store: &SnapshotStore,
    player_id: PlayerId,
    kind: CareerKind,
) -> Result<Option<CareerTable>> {
    if !store.exists(&SnapshotKey::PlayerCareer(player_id, kind)) {
        client.pause().await;
    }
    load_or_fetch_career(client, store, player_id, kind).await
}

/// Squad names are more reliable than the page title.
fn with_name(mut table: CareerTable, name: &str) -> CareerTable {
    if !name.is_empty() {
        table.player_name = name.to_string();
    }
    table
}
