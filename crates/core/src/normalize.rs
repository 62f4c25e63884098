//! Mapping of directory records into the local canonical shapes.
//!
//! Everything here is pure. Missing or empty optional values become `None`;
//! a zero count stays `Some(0)` since zero is a real value.

use chrono::{DateTime, NaiveDate, Utc};

use crate::catalog::ShowRecordInput;
use crate::directory::{EpisodeExternal, ShowExternal};
use crate::search::EpisodeRecord;

/// Map a directory show into the cache input shape.
pub fn to_show_input(external: ShowExternal, search_term: &str) -> ShowRecordInput {
    ShowRecordInput {
        external_id: external.track_id,
        name: external.collection_name,
        artist: external.artist_name,
        artwork_small_url: non_empty(external.artwork_url_100),
        artwork_large_url: non_empty(external.artwork_url_600),
        feed_url: non_empty(external.feed_url),
        episode_count: external.track_count,
        primary_genre: non_empty(external.primary_genre_name),
        release_date: external.release_date.as_deref().and_then(parse_release_date),
        search_term: search_term.to_string(),
    }
}

/// Map a directory episode into the response shape.
pub fn to_episode_record(external: EpisodeExternal) -> EpisodeRecord {
    EpisodeRecord {
        external_id: external.track_id,
        show_id: external.collection_id,
        title: external.track_name,
        show_name: external.collection_name,
        artist: external.artist_name,
        artwork_small_url: non_empty(external.artwork_url_160),
        artwork_large_url: non_empty(external.artwork_url_600),
        release_date: external.release_date,
        duration_ms: external.track_time_millis,
        media_url: non_empty(external.episode_url),
        description: non_empty(external.description),
        short_description: non_empty(external.short_description),
    }
}

/// Parse a directory release date.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (read as
/// midnight UTC). Anything else is treated as unknown.
pub fn parse_release_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
