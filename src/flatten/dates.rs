//! Epoch-millisecond timestamps and date ordering.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::cmp::Ordering;

pub const UNDATED: &str = "-";

/// Epoch milliseconds (number or digit string) to a UTC timestamp.
pub fn parse_epoch_millis(value: &Value) -> Option<DateTime<Utc>> {
    let millis = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    DateTime::from_timestamp_millis(millis)
}

/// Calendar date from `YYYY-MM-DD` (optionally followed by a time) or
/// epoch milliseconds.
pub fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) && text.len() > 8 {
        return parse_epoch_millis(&Value::String(text.to_string()));
    }
    let prefix = text.get(..10)?;
    let date = NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// `YYYY-MM-DD`, or `-` for undated records.
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNDATED.to_string())
}

/// Stable sort by date; undated records always sort last.
pub fn sort_by_date<T, F>(records: &mut [T], key: F, most_recent_first: bool)
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    records.sort_by(|a, b| match (key(a), key(b)) {
        (Some(x), Some(y)) => {
            if most_recent_first {
                y.cmp(&x)
            } else {
                x.cmp(&y)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
