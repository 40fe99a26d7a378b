//! Venue details and series venue lists.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::text_field;
use crate::cli::types::VenueId;

/// A stadium as stored in `venues.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueRecord {
    #[serde(skip)]
    pub venue_id: Option<VenueId>,
    #[serde(rename = "Venue Name")]
    pub ground: String,
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(rename = "Capacity", deserialize_with = "capacity_from_csv")]
    pub capacity: u64,
}

/// Capacity as published: thousands separators (including the Indian
/// `1,32,000` grouping) are removed; anything that is not then a plain
/// digit string is 0.
pub fn parse_capacity(text: &str) -> u64 {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    cleaned.parse().unwrap_or(0)
}

fn capacity_from_csv<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_capacity(&raw))
}

/// Flatten a `venues/v1/{id}` response; a venue without a ground is dropped.
pub fn flatten_venue(venue_id: Option<VenueId>, root: &Value) -> Option<VenueRecord> {
    let ground = text_field(root, "ground")?;
    let capacity = match root.get("capacity") {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => parse_capacity(s),
        _ => 0,
    };
    Some(VenueRecord {
        venue_id,
        ground,
        city: text_field(root, "city").unwrap_or_default(),
        country: text_field(root, "country").unwrap_or_default(),
        capacity,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesVenue {
    pub ground: String,
    pub country: String,
}

/// Flatten `series/v1/{id}/venues`; entries need both ground and country.
pub fn flatten_series_venues(root: &Value) -> Vec<SeriesVenue> {
    root.get("seriesVenue")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|v| {
                    Some(SeriesVenue {
                        ground: text_field(v, "ground")?,
                        country: text_field(v, "country")?,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("1,32,000"), 132000);
        assert_eq!(parse_capacity("25,000"), 25000);
        assert_eq!(parse_capacity(" 40000 "), 40000);
        assert_eq!(parse_capacity("N/A"), 0);
        assert_eq!(parse_capacity("approx 30000"), 0);
        assert_eq!(parse_capacity(""), 0);
    }

    #[test]
    fn test_flatten_venue() {
        let root = json!({"ground": "Narendra Modi Stadium", "city": "Ahmedabad", "country": "India", "capacity": "1,32,000"});
        let venue = flatten_venue(Some(VenueId::new(50)), &root).unwrap();
        assert_eq!(venue.capacity, 132000);
        assert_eq!(venue.country, "India");
        assert_eq!(venue.venue_id, Some(VenueId::new(50)));

        let numeric = flatten_venue(None, &json!({"ground": "Lord's", "capacity": 31100})).unwrap();
        assert_eq!(numeric.capacity, 31100);
        assert_eq!(numeric.city, "");
    }

    #[test]
    fn test_venue_without_ground_is_dropped() {
        assert!(flatten_venue(None, &json!({"city": "Nowhere", "capacity": "5000"})).is_none());
    }

    #[test]
    fn test_flatten_series_venues() {
        let root = json!({"seriesVenue": [
            {"ground": "Adelaide Oval", "country": "Australia"},
            {"ground": "Unknown Ground"}
        ]});
        let venues = flatten_series_venues(&root);
        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].country, "Australia");
    }
}
