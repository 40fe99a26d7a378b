//! Venue capacity (Q4) and home/away results (Q12).

use std::collections::{BTreeMap, HashMap};

use super::table::{Cell, TableRow};
use crate::flatten::{MatchRecord, SeriesVenue, VenueRecord};

pub const LARGE_VENUE_CAPACITY: u64 = 25_000;

#[derive(Debug, Clone, PartialEq)]
pub struct VenueRow {
    pub ground: String,
    pub city: String,
    pub country: String,
    pub capacity: u64,
}

impl TableRow for VenueRow {
    const COLUMNS: &'static [&'static str] = &["Venue Name", "City", "Country", "Capacity"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.ground.as_str().into(),
            self.city.as_str().into(),
            self.country.as_str().into(),
            self.capacity.into(),
        ]
    }
}

/// Q4: venues strictly above `min_capacity`, largest first.
pub fn large_venues(venues: &[VenueRecord], min_capacity: u64) -> Vec<VenueRow> {
    let mut rows: Vec<VenueRow> = venues
        .iter()
        .filter(|v| v.capacity > min_capacity)
        .map(|v| VenueRow {
            ground: v.ground.clone(),
            city: v.city.clone(),
            country: v.country.clone(),
            capacity: v.capacity,
        })
        .collect();
    rows.sort_by(|a, b| b.capacity.cmp(&a.capacity).then_with(|| a.ground.cmp(&b.ground)));
    rows
}

/// Ground name → country, first listing wins.
pub fn venue_countries(venues: &[SeriesVenue]) -> HashMap<String, String> {
    let mut countries = HashMap::new();
    for venue in venues {
        countries
            .entry(venue.ground.trim().to_string())
            .or_insert_with(|| venue.country.trim().to_string());
    }
    countries
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeAwayRow {
    pub team: String,
    pub home_matches: usize,
    pub home_wins: usize,
    pub away_matches: usize,
    pub away_wins: usize,
}

impl TableRow for HomeAwayRow {
    const COLUMNS: &'static [&'static str] =
        &["Team", "Home Matches", "Home Wins", "Away Matches", "Away Wins"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.team.as_str().into(),
            self.home_matches.into(),
            self.home_wins.into(),
            self.away_matches.into(),
            self.away_wins.into(),
        ]
    }
}

/// Upper-cased text before `" won"`, if any.
fn winner_upper(status: &str) -> Option<String> {
    let idx = status.find(" won")?;
    let winner = status[..idx].trim().to_uppercase();
    (!winner.is_empty()).then_some(winner)
}

/// Q12: a side plays at home when its upper-cased name equals the
/// upper-cased country of the ground. Grounds with no known country make
/// both sides away.
pub fn home_away_wins(
    matches: &[MatchRecord],
    countries: &HashMap<String, String>,
) -> Vec<HomeAwayRow> {
    let mut teams: BTreeMap<String, HomeAwayRow> = BTreeMap::new();
    for m in matches {
        if m.team1.name.is_empty() || m.team2.name.is_empty() {
            continue;
        }
        let country = countries
            .get(m.venue.ground.trim())
            .map(|c| c.to_uppercase())
            .unwrap_or_default();
        let winner = winner_upper(&m.status);

        for side in [&m.team1, &m.team2] {
            let team = side.name.trim().to_uppercase();
            let won = winner.as_deref() == Some(team.as_str());
            let row = teams.entry(team.clone()).or_insert_with(|| HomeAwayRow {
                team: team.clone(),
                ..HomeAwayRow::default()
            });
            if !country.is_empty() && team == country {
                row.home_matches += 1;
                row.home_wins += usize::from(won);
            } else {
                row.away_matches += 1;
                row.away_wins += usize::from(won);
            }
        }
    }
    teams.into_values().collect()
}
