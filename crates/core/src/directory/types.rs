//! Typed records returned by the remote podcast directory.
//!
//! Field names follow the iTunes Search API wire format.

use serde::{Deserialize, Serialize};

/// Response envelope shared by every directory search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySearchResponse<T> {
    /// Number of results the directory claims to return.
    #[serde(default)]
    pub result_count: u32,
    /// The results, relevance-ranked by the directory.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A show (podcast) as returned by the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShowExternal {
    /// Stable directory identifier.
    pub track_id: i64,
    /// Show title.
    #[serde(default)]
    pub collection_name: String,
    /// Publisher name.
    #[serde(default)]
    pub artist_name: String,
    /// 100x100 artwork.
    #[serde(rename = "artworkUrl100", default, skip_serializing_if = "Option::is_none")]
    pub artwork_url_100: Option<String>,
    /// 600x600 artwork.
    #[serde(rename = "artworkUrl600", default, skip_serializing_if = "Option::is_none")]
    pub artwork_url_600: Option<String>,
    /// RSS feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    /// Number of episodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_genre_name: Option<String>,
    /// Release date as sent by the directory (usually RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// An episode as returned by the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeExternal {
    /// Episode identifier.
    pub track_id: i64,
    /// Identifier of the show the episode belongs to.
    pub collection_id: i64,
    /// Episode title.
    #[serde(default)]
    pub track_name: String,
    /// Show title.
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(rename = "artworkUrl160", default, skip_serializing_if = "Option::is_none")]
    pub artwork_url_160: Option<String>,
    #[serde(rename = "artworkUrl600", default, skip_serializing_if = "Option::is_none")]
    pub artwork_url_600: Option<String>,
    /// Present in every directory response, but may be empty.
    #[serde(default)]
    pub release_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_time_millis: Option<u64>,
    /// Playable media URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
}
