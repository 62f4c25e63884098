//! Remote podcast directory integration.
//!
//! Show and episode searches go to the same remote endpoint but are treated
//! differently on failure: show results are essential, so their errors
//! propagate; episode results are supplementary, so
//! [`search_episodes_or_empty`] degrades them to an empty list.

mod itunes;
mod types;

pub use itunes::{ItunesClient, ItunesConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::metrics::EPISODE_SEARCH_DEGRADED;

/// Default number of results requested per query.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Errors that can occur when talking to the remote directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// The directory answered with a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// A searchable podcast directory.
#[async_trait]
pub trait PodcastDirectory: Send + Sync {
    /// Name of the backend, used in logs and metrics.
    fn name(&self) -> &str;

    /// Search shows matching `term`, in the directory's relevance order.
    async fn search_shows(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<ShowExternal>, DirectoryError>;

    /// Search episodes matching `term`, in the directory's relevance order.
    async fn search_episodes(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<EpisodeExternal>, DirectoryError>;
}

/// Episode search that never fails.
///
/// Any remote error is logged and replaced by an empty list.
pub async fn search_episodes_or_empty(
    directory: &dyn PodcastDirectory,
    term: &str,
    limit: u32,
) -> Vec<EpisodeExternal> {
    match directory.search_episodes(term, limit).await {
        Ok(episodes) => episodes,
        Err(e) => {
            warn!(
                directory = directory.name(),
                term = term,
                error = %e,
                "Episode search failed, returning no episodes"
            );
            EPISODE_SEARCH_DEGRADED.inc();
            Vec::new()
        }
    }
}
