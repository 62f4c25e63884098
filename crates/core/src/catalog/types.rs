//! Types for the show cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical show fields, as produced by normalization.
///
/// This is everything a [`ShowRecord`] holds except the timestamps, which
/// the store owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowRecordInput {
    /// Directory identifier; the cache key.
    pub external_id: i64,
    /// Display name.
    pub name: String,
    /// Publisher/artist name.
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork_small_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork_large_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    /// Term of the search that last wrote this record.
    pub search_term: String,
}

/// A cached show.
///
/// Absent optional fields serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowRecord {
    pub external_id: i64,
    pub name: String,
    pub artist: String,
    pub artwork_small_url: Option<String>,
    pub artwork_large_url: Option<String>,
    pub feed_url: Option<String>,
    pub episode_count: Option<u32>,
    pub primary_genre: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub search_term: String,
    /// When first cached. Never changes afterwards.
    pub created_at: DateTime<Utc>,
    /// When last written.
    pub updated_at: DateTime<Utc>,
}

impl ShowRecord {
    /// Build a record from its input fields and timestamps.
    pub fn from_input(
        input: ShowRecordInput,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            external_id: input.external_id,
            name: input.name,
            artist: input.artist,
            artwork_small_url: input.artwork_small_url,
            artwork_large_url: input.artwork_large_url,
            feed_url: input.feed_url,
            episode_count: input.episode_count,
            primary_genre: input.primary_genre,
            release_date: input.release_date,
            search_term: input.search_term,
            created_at,
            updated_at,
        }
    }

    /// Artwork to render: the large image when available.
    pub fn artwork_url(&self) -> Option<&str> {
        self.artwork_large_url
            .as_deref()
            .or(self.artwork_small_url.as_deref())
    }

    /// The non-timestamp fields of this record.
    pub fn to_input(&self) -> ShowRecordInput {
        ShowRecordInput {
            external_id: self.external_id,
            name: self.name.clone(),
            artist: self.artist.clone(),
            artwork_small_url: self.artwork_small_url.clone(),
            artwork_large_url: self.artwork_large_url.clone(),
            feed_url: self.feed_url.clone(),
            episode_count: self.episode_count,
            primary_genre: self.primary_genre.clone(),
            release_date: self.release_date,
            search_term: self.search_term.clone(),
        }
    }
}

/// Query for listing cached shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowListQuery {
    /// Only shows last written by this search term.
    #[serde(default)]
    pub search_term: Option<String>,
    /// Maximum results.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for ShowListQuery {
    fn default() -> Self {
        Self {
            search_term: None,
            limit: default_limit(),
        }
    }
}

fn default_limit() -> u32 {
    100
}

/// Errors for show cache operations.
#[derive(Debug, Clone, Error)]
pub enum ShowStoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
