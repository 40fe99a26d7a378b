//! Snapshot files on disk plus a small in-memory request memo
//!
//! Two layers live here:
//! - `SnapshotStore`: JSON and CSV files under the data directory. A file
//!   that exists is always used; deleting it is the only invalidation.
//! - `RequestCache`: an LRU memo of API responses with a TTL, owned by the
//!   command layer for the lifetime of one invocation.

use lru::LruCache;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{
    fs,
    io::{ErrorKind, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::cli::types::{CareerKind, MatchId, PlayerId, SeriesId};
use crate::error::{CricketError, Result};

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Every snapshot the pipeline reads or writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    RecentMatches,
    Match(MatchId),
    MatchInfo(MatchId),
    PlayerCareer(PlayerId, CareerKind),
    Series(SeriesId),
    Venues,
    Series2024,
    TossCache,
    QueryAnswer(u8),
}

impl SnapshotKey {
    /// File name relative to the data directory.
    pub fn file_name(&self) -> String {
        match self {
            SnapshotKey::RecentMatches => "recent_matches.json".to_string(),
            SnapshotKey::Match(id) => format!("match_{}.json", id),
            SnapshotKey::MatchInfo(id) => format!("matchinfo_{}.json", id),
            SnapshotKey::PlayerCareer(id, kind) => {
                format!("player_{}_{}.json", id, kind.as_path())
            }
            SnapshotKey::Series(id) => format!("series_{}.json", id),
            SnapshotKey::Venues => "venues.csv".to_string(),
            SnapshotKey::Series2024 => "series_2024.csv".to_string(),
            SnapshotKey::TossCache => "toss_cache.json".to_string(),
            SnapshotKey::QueryAnswer(n) => format!("question{}_answer.csv", n),
        }
    }
}

/// Read-if-exists / write-once snapshot files under one directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, key: &SnapshotKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    pub fn exists(&self, key: &SnapshotKey) -> bool {
        self.path(key).is_file()
    }

    /// Raw file contents, `None` when the snapshot is absent.
    pub fn load_text(&self, key: &SnapshotKey) -> Result<Option<String>> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(text) => {
                log::debug!("snapshot hit: {}", path.display());
                Ok(Some(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("snapshot miss: {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn store_text(&self, key: &SnapshotKey, contents: &str) -> Result<()> {
        let path = self.path(key);
        write_string(&path, contents)?;
        log::debug!("snapshot written: {}", path.display());
        Ok(())
    }

    /// Parsed JSON snapshot. An unparseable file is a corrupt-cache error.
    pub fn load_json(&self, key: &SnapshotKey) -> Result<Option<Value>> {
        let Some(text) = self.load_text(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| self.corrupt(key, e))
    }

    pub fn store_json(&self, key: &SnapshotKey, value: &Value) -> Result<()> {
        let contents = serde_json::to_string_pretty(value)?;
        self.store_text(key, &contents)
    }

    /// Deserialize every row of a CSV snapshot.
    pub fn load_csv<T: DeserializeOwned>(&self, key: &SnapshotKey) -> Result<Option<Vec<T>>> {
        let Some(text) = self.load_text(key)? else {
            return Ok(None);
        };
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row.map_err(|e| self.corrupt(key, e))?);
        }
        Ok(Some(rows))
    }

    pub fn store_csv<T: Serialize>(&self, key: &SnapshotKey, rows: &[T]) -> Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CricketError::Io(e.into_error()))?;
        self.store_text(key, &String::from_utf8_lossy(&bytes))
    }

    /// Delete a snapshot. Returns whether a file was removed.
    pub fn invalidate(&self, key: &SnapshotKey) -> Result<bool> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("removed snapshot {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Ids of every `match_{id}.json`, ascending.
    pub fn match_ids(&self) -> Result<Vec<MatchId>> {
        Ok(self
            .ids_matching("match_", ".json")?
            .into_iter()
            .map(MatchId::new)
            .collect())
    }

    /// Ids of every `player_{id}_{kind}.json`, ascending.
    pub fn career_ids(&self, kind: CareerKind) -> Result<Vec<PlayerId>> {
        let suffix = format!("_{}.json", kind.as_path());
        Ok(self
            .ids_matching("player_", &suffix)?
            .into_iter()
            .map(PlayerId::new)
            .collect())
    }

    /// Ids of every `series_{id}.json`, ascending.
    pub fn series_ids(&self) -> Result<Vec<SeriesId>> {
        Ok(self
            .ids_matching("series_", ".json")?
            .into_iter()
            .map(SeriesId::new)
            .collect())
    }

    fn ids_matching(&self, prefix: &str, suffix: &str) -> Result<Vec<u64>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(middle) = name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(suffix))
            else {
                continue;
            };
            if !middle.is_empty() && middle.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(id) = middle.parse::<u64>() {
                    ids.push(id);
                }
            }
        }
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    fn corrupt(&self, key: &SnapshotKey, e: impl std::fmt::Display) -> CricketError {
        CricketError::CorruptSnapshot {
            path: self.path(key).display().to_string(),
            message: e.to_string(),
        }
    }
}

/// LRU memo of API responses keyed by request path, with a TTL.
pub struct RequestCache {
    entries: Mutex<LruCache<String, (Instant, Value)>>,
    ttl: Duration,
}

impl RequestCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Fresh entry for `key`; expired entries are evicted on read.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().ok()?;
        let fresh = match entries.get(key) {
            Some((stored_at, value)) if stored_at.elapsed() <= self.ttl => Some(value.clone()),
            Some(_) => None,
            None => return None,
        };
        if fresh.is_none() {
            entries.pop(key);
        }
        fresh
    }

    pub fn put(&self, key: impl Into<String>, value: Value) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(key.into(), (Instant::now(), value));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_string_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("subdir").join("output.txt");

        write_string(&file_path, "test content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "test content");
    }

    #[test]
    fn test_snapshot_file_names() {
        assert_eq!(SnapshotKey::RecentMatches.file_name(), "recent_matches.json");
        assert_eq!(SnapshotKey::Match(MatchId::new(101)).file_name(), "match_101.json");
        assert_eq!(
            SnapshotKey::MatchInfo(MatchId::new(101)).file_name(),
            "matchinfo_101.json"
        );
        assert_eq!(
            SnapshotKey::PlayerCareer(PlayerId::new(1413), CareerKind::Bowling).file_name(),
            "player_1413_bowling.json"
        );
        assert_eq!(SnapshotKey::Series(SeriesId::new(6732)).file_name(), "series_6732.json");
        assert_eq!(SnapshotKey::Venues.file_name(), "venues.csv");
        assert_eq!(SnapshotKey::Series2024.file_name(), "series_2024.csv");
        assert_eq!(SnapshotKey::TossCache.file_name(), "toss_cache.json");
        assert_eq!(SnapshotKey::QueryAnswer(9).file_name(), "question9_answer.csv");
    }

    #[test]
    fn test_json_snapshot_round_trip_and_miss() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let key = SnapshotKey::RecentMatches;

        assert!(store.load_json(&key).unwrap().is_none());

        store.store_json(&key, &json!({"typeMatches": []})).unwrap();
        assert!(store.exists(&key));
        assert_eq!(
            store.load_json(&key).unwrap(),
            Some(json!({"typeMatches": []}))
        );
    }

    #[test]
    fn test_corrupt_json_snapshot_propagates() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let key = SnapshotKey::Match(MatchId::new(7));
        fs::write(store.path(&key), "{not json").unwrap();

        match store.load_json(&key) {
            Err(CricketError::CorruptSnapshot { path, .. }) => assert!(path.ends_with("match_7.json")),
            other => panic!("Expected CorruptSnapshot, got {:?}", other),
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        #[serde(rename = "Venue Name")]
        name: String,
        #[serde(rename = "Capacity")]
        capacity: u64,
    }

    #[test]
    fn test_csv_snapshot_round_trip() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let rows = vec![
            Row { name: "Eden Gardens".to_string(), capacity: 66000 },
            Row { name: "Lord's".to_string(), capacity: 31100 },
        ];

        store.store_csv(&SnapshotKey::Venues, &rows).unwrap();
        let text = fs::read_to_string(store.path(&SnapshotKey::Venues)).unwrap();
        assert!(text.starts_with("Venue Name,Capacity"));

        let loaded: Vec<Row> = store.load_csv(&SnapshotKey::Venues).unwrap().unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_corrupt_csv_snapshot_propagates() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        fs::write(
            store.path(&SnapshotKey::Venues),
            "Venue Name,Capacity\nLord's,lots\n",
        )
        .unwrap();

        let result: Result<Option<Vec<Row>>> = store.load_csv(&SnapshotKey::Venues);
        assert!(matches!(result, Err(CricketError::CorruptSnapshot { .. })));
    }

    #[test]
    fn test_invalidate_removes_file_once() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let key = SnapshotKey::QueryAnswer(9);
        store.store_text(&key, "a,b\n").unwrap();

        assert!(store.invalidate(&key).unwrap());
        assert!(!store.invalidate(&key).unwrap());
        assert!(!store.exists(&key));
    }

    #[test]
    fn test_listing_ids_is_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        for name in [
            "match_30.json",
            "match_4.json",
            "matchinfo_4.json",
            "match_abc.json",
            "player_12_batting.json",
            "player_3_batting.json",
            "player_3_bowling.json",
            "series_6732.json",
            "series_2024.csv",
        ] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        assert_eq!(
            store.match_ids().unwrap(),
            vec![MatchId::new(4), MatchId::new(30)]
        );
        assert_eq!(
            store.career_ids(CareerKind::Batting).unwrap(),
            vec![PlayerId::new(3), PlayerId::new(12)]
        );
        assert_eq!(
            store.career_ids(CareerKind::Bowling).unwrap(),
            vec![PlayerId::new(3)]
        );
        assert_eq!(store.series_ids().unwrap(), vec![SeriesId::new(6732)]);
    }

    #[test]
    fn test_listing_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("absent"));
        assert!(store.match_ids().unwrap().is_empty());
    }

    #[test]
    fn test_request_cache_hits_and_evicts() {
        let cache = RequestCache::new(2, Duration::from_secs(60));
        assert!(cache.is_empty());

        cache.put("a", json!(1));
        cache.put("b", json!(2));
        cache.put("c", json!(3));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("c"), Some(json!(3)));
    }

    #[test]
    fn test_request_cache_expires_entries() {
        let cache = RequestCache::new(4, Duration::ZERO);
        cache.put("teams", json!({"list": []}));
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(cache.get("teams"), None);
        assert!(cache.is_empty());
    }
}
