//! Toss outcomes from `toss_cache.json` (`{match_id: {toss_winner, decision, match_winner}}`).

use serde::Serialize;
use serde_json::Value;

use super::text_field;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TossRecord {
    pub match_id: String,
    pub toss_winner: Option<String>,
    pub decision: Option<String>,
    pub match_winner: Option<String>,
}

/// One record per entry, ordered by match id (numerically where possible).
pub fn flatten_toss_cache(root: &Value) -> Vec<TossRecord> {
    let Some(entries) = root.as_object() else {
        return Vec::new();
    };
    let mut records: Vec<TossRecord> = entries
        .iter()
        .filter(|(_, v)| v.is_object())
        .map(|(id, v)| TossRecord {
            match_id: id.clone(),
            toss_winner: text_field(v, "toss_winner"),
            decision: text_field(v, "decision"),
            match_winner: text_field(v, "match_winner"),
        })
        .collect();
    records.sort_by(|a, b| {
        match (a.match_id.parse::<u64>(), b.match_id.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.match_id.cmp(&b.match_id),
        }
    });
    records
}
