//! HTTP header utilities for RapidAPI communication

use crate::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

pub const RAPIDAPI_KEY_HEADER: &str = "x-rapidapi-key";
pub const RAPIDAPI_HOST_HEADER: &str = "x-rapidapi-host";

/// Build the static headers sent with every Cricbuzz request.
pub fn rapidapi_header_map(api_key: &str, api_host: &str) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        HeaderName::from_static(RAPIDAPI_KEY_HEADER),
        HeaderValue::from_str(api_key)?,
    );
    h.insert(
        HeaderName::from_static(RAPIDAPI_HOST_HEADER),
        HeaderValue::from_str(api_host)?,
    );
    Ok(h)
}
