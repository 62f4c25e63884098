//! Search aggregation.
//!
//! [`SearchService`] fans a term out to the directory, caches the shows it
//! finds and hands back shows and episodes together.

mod service;
mod types;

pub use service::SearchService;
pub use types::*;

use thiserror::Error;

use crate::catalog::ShowStoreError;
use crate::directory::DirectoryError;

/// Errors surfaced by [`SearchService::search`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// The term was missing or blank.
    #[error("Invalid search: {0}")]
    Validation(String),

    /// The show query to the directory failed.
    #[error("Show search for '{term}' failed: {source}")]
    RemoteUnavailable {
        term: String,
        #[source]
        source: DirectoryError,
    },

    /// A show could not be written to the cache.
    #[error("Failed to cache show {external_id} for '{term}': {source}")]
    Persistence {
        term: String,
        external_id: i64,
        #[source]
        source: ShowStoreError,
    },
}

impl SearchError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::RemoteUnavailable { .. } => "remote_unavailable",
            Self::Persistence { .. } => "persistence_failed",
        }
    }
}
