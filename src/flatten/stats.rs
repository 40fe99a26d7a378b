//! Career stat tables from `stats/v1/player/{id}/{batting,bowling}`.
//!
//! The response is a grid: `headers` names the columns (`ROWHEADER`,
//! `Test`, `ODI`, `T20`, `IPL`, ...) and each `values[].values` row starts
//! with its label (`Matches`, `Runs`, `Average`, ...).

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::parse_number;
use crate::cli::types::{MatchFormat, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerRow {
    pub label: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerTable {
    pub player_id: Option<PlayerId>,
    pub player_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<CareerRow>,
}

impl CareerTable {
    /// `None` when the response carries no `headers`.
    pub fn from_json(player_id: Option<PlayerId>, root: &Value) -> Option<Self> {
        let headers: Vec<String> = root
            .get("headers")?
            .as_array()?
            .iter()
            .map(cell_text)
            .collect();

        let rows = root
            .get("values")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| {
                        let values: Vec<String> =
                            row.get("values")?.as_array()?.iter().map(cell_text).collect();
                        Some(CareerRow {
                            label: values.first().cloned().unwrap_or_default(),
                            values,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let player_name = root
            .get("appIndex")
            .and_then(|a| a.get("seoTitle"))
            .and_then(Value::as_str)
            .map(player_name_from_title)
            .unwrap_or_else(|| "Unknown".to_string());

        Some(Self {
            player_id,
            player_name,
            headers,
            rows,
        })
    }

    /// Column index for a format; `T20` and `T20I` are the same column.
    pub fn format_column(&self, format: MatchFormat) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| format.matches_label(h))
    }

    pub fn has_format(&self, format: MatchFormat) -> bool {
        self.format_column(format).is_some()
    }

    /// Formats present in the header row, in header order.
    pub fn formats(&self) -> Vec<MatchFormat> {
        self.headers
            .iter()
            .filter_map(|h| MatchFormat::from_label(h))
            .collect()
    }

    /// Raw cell under an exactly named row (case-insensitive).
    pub fn raw(&self, label: &str, format: MatchFormat) -> Option<&str> {
        let column = self.format_column(format)?;
        self.rows
            .iter()
            .find(|r| r.label.eq_ignore_ascii_case(label))
            .and_then(|r| r.values.get(column))
            .map(String::as_str)
    }

    /// Parsed cell; `None` when the row, column or number is missing.
    pub fn number(&self, label: &str, format: MatchFormat) -> Option<f64> {
        self.raw(label, format).and_then(parse_number)
    }

    /// Cell from the first row whose label contains `needle`
    /// (case-insensitive), e.g. `"eco"` for `Eco`/`Economy`.
    pub fn number_containing(&self, needle: &str, format: MatchFormat) -> Option<f64> {
        let column = self.format_column(format)?;
        let needle = needle.to_lowercase();
        self.rows
            .iter()
            .find(|r| r.label.to_lowercase().contains(&needle))
            .and_then(|r| r.values.get(column))
            .and_then(|v| parse_number(v))
    }

    /// Header-keyed records; rows whose length differs from the header
    /// are skipped.
    pub fn records(&self) -> Vec<BTreeMap<String, String>> {
        self.rows
            .iter()
            .filter(|r| r.values.len() == self.headers.len())
            .map(|r| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(r.values.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

/// `"Virat Kohli Profile - Cricbuzz"` → `"Virat Kohli"`.
pub fn player_name_from_title(title: &str) -> String {
    title
        .split(" Profile")
        .next()
        .unwrap_or(title)
        .trim()
        .to_string()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
