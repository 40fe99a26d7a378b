//! Series rows from `series_2024.csv` or a `series/v1/{id}` snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use super::dates::format_date;
use super::matches::flatten_series_matches;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    #[serde(rename = "Series Name")]
    pub series_name: String,
    #[serde(rename = "Host Country", default)]
    pub host_country: String,
    #[serde(rename = "Match Type", default)]
    pub match_type: String,
    #[serde(rename = "Start Date", default)]
    pub start_date: String,
    #[serde(rename = "Total Matches Planned", default)]
    pub total_matches: u32,
}

impl SeriesRecord {
    /// Summarise a series-detail response. The feed has no host country,
    /// so it reads `Various`; the start date is the earliest match date.
    pub fn from_series_json(fallback_name: &str, root: &Value) -> Self {
        let matches = flatten_series_matches(root);
        let series_name = matches
            .iter()
            .map(|m| m.series_name.as_str())
            .find(|n| !n.is_empty())
            .unwrap_or(fallback_name)
            .to_string();
        let formats: BTreeSet<&str> = matches
            .iter()
            .map(|m| m.format.as_str())
            .filter(|f| !f.is_empty())
            .collect();
        let match_type = if formats.len() == 1 {
            formats.iter().next().copied().unwrap_or("Various").to_string()
        } else {
            "Various".to_string()
        };
        let start = matches.iter().filter_map(|m| m.start_date).min();

        Self {
            series_name,
            host_country: "Various".to_string(),
            match_type,
            start_date: format_date(start.as_ref()),
            total_matches: matches.len() as u32,
        }
    }
}
