//! Testing utilities and mock implementations.
//!
//! This module provides a mock podcast directory and an in-memory show store,
//! allowing search flows to be tested without network or disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use podsearch_core::testing::{fixtures, MemoryShowStore, MockDirectory};
//!
//! let directory = MockDirectory::new();
//! let store = MemoryShowStore::new();
//!
//! // Configure mock responses
//! directory.set_shows(vec![fixtures::show_external(111, "Morning News")]).await;
//! store.set_delay(111, Duration::from_millis(20)).await;
//!
//! // Use in SearchService...
//! ```

mod memory_store;
mod mock_directory;

pub use memory_store::MemoryShowStore;
pub use mock_directory::{MockDirectory, RecordedDirectoryQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::ShowRecordInput;
    use crate::directory::{EpisodeExternal, ShowExternal};
    use crate::normalize::to_show_input;

    /// Create a directory show with every optional field populated.
    pub fn show_external(id: i64, name: &str) -> ShowExternal {
        ShowExternal {
            track_id: id,
            collection_name: name.to_string(),
            artist_name: format!("{} Media", name),
            artwork_url_100: Some(format!("https://img.example/{}/100x100bb.jpg", id)),
            artwork_url_600: Some(format!("https://img.example/{}/600x600bb.jpg", id)),
            feed_url: Some(format!("https://feeds.example/{}.xml", id)),
            track_count: Some(120),
            primary_genre_name: Some("News".to_string()),
            release_date: Some("2024-05-01T09:45:00Z".to_string()),
        }
    }

    /// Create a directory episode belonging to `show_id`.
    pub fn episode_external(id: i64, show_id: i64, title: &str) -> EpisodeExternal {
        EpisodeExternal {
            track_id: id,
            collection_id: show_id,
            track_name: title.to_string(),
            collection_name: format!("Show {}", show_id),
            artist_name: "Some Publisher".to_string(),
            artwork_url_160: Some(format!("https://img.example/{}/160x160bb.jpg", show_id)),
            artwork_url_600: Some(format!("https://img.example/{}/600x600bb.jpg", show_id)),
            release_date: "2024-05-06T05:00:00Z".to_string(),
            track_time_millis: Some(1_500_000),
            episode_url: Some(format!("https://media.example/{}.mp3", id)),
            description: Some(format!("{} in full.", title)),
            short_description: Some(title.to_string()),
        }
    }

    /// Create a normalized show input tagged with `term`.
    pub fn show_input(id: i64, name: &str, term: &str) -> ShowRecordInput {
        to_show_input(show_external(id, name), term)
    }
}
