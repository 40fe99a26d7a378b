//! Core utilities for the Cricbuzz analytics CLI
//!
//! This module consolidates common utilities that are used across
//! the application:
//! - `cache`: snapshot files on disk and the in-memory request memo
//! - `http`: RapidAPI request headers

pub mod cache;
pub mod http;

pub use cache::{write_string, RequestCache, SnapshotKey, SnapshotStore};
pub use http::rapidapi_header_map;
