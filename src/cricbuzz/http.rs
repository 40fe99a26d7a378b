//! Cricbuzz REST client.
//!
//! Every request goes through [`CricbuzzClient::get`], which never fails:
//! a 200 with a JSON body is [`FetchOutcome::Data`], a 429 is
//! [`FetchOutcome::RateLimited`] and anything else is
//! [`FetchOutcome::Empty`]. Callers treat the last two as zero records.

use reqwest::{header::HeaderMap, Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::cli::types::{CareerKind, MatchId, MatchListing, PlayerId, SeriesId, TeamId, VenueId};
use crate::config::AppConfig;
use crate::core::{rapidapi_header_map, RequestCache};
use crate::Result;


/// Result of one API request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Data(Value),
    RateLimited,
    /// Non-200 status (when one was received), transport error or an
    /// unparseable body.
    Empty { status: Option<u16> },
}

impl FetchOutcome {
    pub fn into_data(self) -> Option<Value> {
        match self {
            FetchOutcome::Data(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchOutcome::RateLimited)
    }
}

pub struct CricbuzzClient {
    http: Client,
    base_url: String,
    headers: HeaderMap,
    request_delay: Duration,
    memo: Option<RequestCache>,
}

impl CricbuzzClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("cricbuzz-analytics/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: rapidapi_header_map(&config.api_key, &config.api_host)?,
            request_delay: config.request_delay,
            memo: None,
        })
    }

    /// Memoise successful responses for the lifetime of this client.
    pub fn with_request_cache(mut self, cache: RequestCache) -> Self {
        self.memo = Some(cache);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// Fixed pause taken before each request of a bulk loop.
    pub async fn pause(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> FetchOutcome {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let memo_key = memo_key(&url, query);

        if let Some(hit) = self.memo.as_ref().and_then(|m| m.get(&memo_key)) {
            log::debug!("memo hit for {}", memo_key);
            return FetchOutcome::Data(hit);
        }

        log::debug!("GET {}", memo_key);
        let response = match self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .query(query)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                log::warn!("request to {} failed: {}", url, e);
                return FetchOutcome::Empty { status: None };
            }
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            log::warn!("rate limited by {}", url);
            return FetchOutcome::RateLimited;
        }
        if status != StatusCode::OK {
            log::warn!("{} returned {}", url, status);
            return FetchOutcome::Empty {
                status: Some(status.as_u16()),
            };
        }

        match response.json::<Value>().await {
            Ok(value) => {
                if let Some(memo) = &self.memo {
                    memo.put(memo_key, value.clone());
                }
                FetchOutcome::Data(value)
            }
            Err(e) => {
                log::warn!("{} returned an unreadable body: {}", url, e);
                FetchOutcome::Empty {
                    status: Some(status.as_u16()),
                }
            }
        }
    }

    pub async fn matches(&self, listing: MatchListing) -> FetchOutcome {
        self.get(&format!("matches/v1/{}", listing.as_path()), &[]).await
    }

    pub async fn team_players(&self, team_id: TeamId) -> FetchOutcome {
        self.get(&format!("teams/v1/{}/players", team_id), &[]).await
    }

    pub async fn international_teams(&self) -> FetchOutcome {
        self.get("teams/v1/international", &[]).await
    }

    pub async fn search_player(&self, name: &str) -> FetchOutcome {
        self.get("stats/v1/player/search", &[("plrN", name)]).await
    }

    pub async fn player_career(&self, player_id: PlayerId, kind: CareerKind) -> FetchOutcome {
        self.get(
            &format!("stats/v1/player/{}/{}", player_id, kind.as_path()),
            &[],
        )
        .await
    }

    pub async fn match_info(&self, match_id: MatchId) -> FetchOutcome {
        self.get(&format!("mcenter/v1/{}", match_id), &[]).await
    }

    pub async fn match_scorecard(&self, match_id: MatchId) -> FetchOutcome {
        self.get(&format!("mcenter/v1/{}/scard", match_id), &[]).await
    }

    pub async fn venue(&self, venue_id: VenueId) -> FetchOutcome {
        self.get(&format!("venues/v1/{}", venue_id), &[]).await
    }

    pub async fn series(&self, series_id: SeriesId) -> FetchOutcome {
        self.get(&format!("series/v1/{}", series_id), &[]).await
    }

    pub async fn series_venues(&self, series_id: SeriesId) -> FetchOutcome {
        self.get(&format!("series/v1/{}/venues", series_id), &[]).await
    }
}

fn memo_key(url: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let params: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{}?{}", url, params.join("&"))
}
