//! Runtime configuration read from the environment (and `.env`).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_ENV_VAR: &str = "RAPIDAPI_KEY";
pub const API_HOST_ENV_VAR: &str = "CRICBUZZ_API_HOST";
pub const BASE_URL_ENV_VAR: &str = "CRICBUZZ_BASE_URL";
pub const DATA_DIR_ENV_VAR: &str = "CRICBUZZ_DATA_DIR";
pub const REQUEST_DELAY_ENV_VAR: &str = "CRICBUZZ_REQUEST_DELAY_MS";
pub const ROSTER_DB_ENV_VAR: &str = "CRICBUZZ_ROSTER_DB";

pub const DEFAULT_API_HOST: &str = "cricbuzz-cricket.p.rapidapi.com";
pub const DUMMY_API_KEY: &str = "DUMMY_KEY";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

/// Settings shared by the API client, the snapshot store and the roster.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_host: String,
    pub base_url: String,
    pub data_dir: PathBuf,
    pub request_delay: Duration,
    pub roster_db: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_ENV_VAR).unwrap_or_else(|| {
            log::warn!(
                "{} is not set; relying on local snapshots in the data directory",
                API_KEY_ENV_VAR
            );
            DUMMY_API_KEY.to_string()
        });
        let api_host = get(API_HOST_ENV_VAR).unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let base_url = get(BASE_URL_ENV_VAR).unwrap_or_else(|| format!("https://{}", api_host));
        let data_dir = get(DATA_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let request_delay = Duration::from_millis(
            get(REQUEST_DELAY_ENV_VAR)
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_REQUEST_DELAY_MS),
        );
        let roster_db = get(ROSTER_DB_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_roster_path);

        Self {
            api_key,
            api_host,
            base_url,
            data_dir,
            request_delay,
            roster_db,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key != DUMMY_API_KEY
    }

    /// Point the client at another server, e.g. a mock in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_request_delay(mut self, request_delay: Duration) -> Self {
        self.request_delay = request_delay;
        self
    }
}

/// Path: ~/.cache/cricbuzz-analytics/roster.db
pub fn default_roster_path() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("cricbuzz-analytics").join("roster.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config.api_key, DUMMY_API_KEY);
        assert!(!config.has_api_key());
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.base_url, "https://cricbuzz-cricket.p.rapidapi.com");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.request_delay, Duration::from_millis(1000));
        assert!(config.roster_db.ends_with("cricbuzz-analytics/roster.db"));
    }

    #[test]
    fn test_values_from_lookup() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV_VAR, " secret "),
            (BASE_URL_ENV_VAR, "http://127.0.0.1:9000"),
            (DATA_DIR_ENV_VAR, "/tmp/cricket"),
            (REQUEST_DELAY_ENV_VAR, "0"),
            (ROSTER_DB_ENV_VAR, "/tmp/roster.db"),
        ]));

        assert_eq!(config.api_key, "secret");
        assert!(config.has_api_key());
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cricket"));
        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.roster_db, PathBuf::from("/tmp/roster.db"));
    }

    #[test]
    fn test_invalid_delay_and_blank_key_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV_VAR, "   "),
            (REQUEST_DELAY_ENV_VAR, "soon"),
        ]));

        assert_eq!(config.api_key, DUMMY_API_KEY);
        assert_eq!(config.request_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[]))
            .with_base_url("http://localhost:1")
            .with_data_dir("/tmp/snapshots")
            .with_request_delay(Duration::from_millis(5));

        assert_eq!(config.base_url, "http://localhost:1");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/snapshots"));
        assert_eq!(config.request_delay, Duration::from_millis(5));
    }
}
