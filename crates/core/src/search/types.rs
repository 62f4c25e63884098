//! Types for search results.

use serde::{Deserialize, Serialize};

use crate::catalog::ShowRecord;

/// An episode returned alongside the shows of a search. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpisodeRecord {
    /// Directory episode identifier.
    pub external_id: i64,
    /// Directory identifier of the parent show.
    pub show_id: i64,
    pub title: String,
    pub show_name: String,
    pub artist: String,
    pub artwork_small_url: Option<String>,
    pub artwork_large_url: Option<String>,
    /// Release date exactly as the directory sent it; may be empty.
    pub release_date: String,
    pub duration_ms: Option<u64>,
    /// Playable audio URL.
    pub media_url: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
}

/// Combined result of one search.
///
/// Shows and episodes keep the order the directory returned them in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The trimmed search term.
    pub term: String,
    pub shows: Vec<ShowRecord>,
    pub episodes: Vec<EpisodeRecord>,
}
