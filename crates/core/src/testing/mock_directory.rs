//! Mock podcast directory for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::directory::{DirectoryError, EpisodeExternal, PodcastDirectory, ShowExternal};

/// A recorded directory query for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedDirectoryQuery {
    Shows { term: String, limit: u32 },
    Episodes { term: String, limit: u32 },
}

impl RecordedDirectoryQuery {
    pub fn term(&self) -> &str {
        match self {
            Self::Shows { term, .. } | Self::Episodes { term, .. } => term,
        }
    }

    pub fn limit(&self) -> u32 {
        match self {
            Self::Shows { limit, .. } | Self::Episodes { limit, .. } => *limit,
        }
    }
}

/// Mock implementation of the PodcastDirectory trait.
///
/// Returns the configured shows and episodes for every term (truncated to
/// the requested limit), records queries, and fails on demand.
///
/// # Example
///
/// ```rust,ignore
/// use podsearch_core::testing::{fixtures, MockDirectory};
///
/// let directory = MockDirectory::new();
/// directory.set_shows(vec![fixtures::show_external(111, "Morning News")]).await;
/// directory.set_next_episode_error(DirectoryError::RateLimitExceeded).await;
/// ```
#[derive(Debug)]
pub struct MockDirectory {
    shows: Arc<RwLock<Vec<ShowExternal>>>,
    episodes: Arc<RwLock<Vec<EpisodeExternal>>>,
    queries: Arc<RwLock<Vec<RecordedDirectoryQuery>>>,
    /// If set, the next show search fails with this error.
    next_show_error: Arc<RwLock<Option<DirectoryError>>>,
    /// If set, the next episode search fails with this error.
    next_episode_error: Arc<RwLock<Option<DirectoryError>>>,
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDirectory {
    /// Create a new empty mock directory.
    pub fn new() -> Self {
        Self {
            shows: Arc::new(RwLock::new(Vec::new())),
            episodes: Arc::new(RwLock::new(Vec::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_show_error: Arc::new(RwLock::new(None)),
            next_episode_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Replace the shows returned by every search.
    pub async fn set_shows(&self, shows: Vec<ShowExternal>) {
        *self.shows.write().await = shows;
    }

    /// Replace the episodes returned by every search.
    pub async fn set_episodes(&self, episodes: Vec<EpisodeExternal>) {
        *self.episodes.write().await = episodes;
    }

    /// Configure the next show search to fail.
    pub async fn set_next_show_error(&self, error: DirectoryError) {
        *self.next_show_error.write().await = Some(error);
    }

    /// Configure the next episode search to fail.
    pub async fn set_next_episode_error(&self, error: DirectoryError) {
        *self.next_episode_error.write().await = Some(error);
    }

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedDirectoryQuery> {
        self.queries.read().await.clone()
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    async fn record(&self, query: RecordedDirectoryQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl PodcastDirectory for MockDirectory {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_shows(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<ShowExternal>, DirectoryError> {
        self.record(RecordedDirectoryQuery::Shows {
            term: term.to_string(),
            limit,
        })
        .await;

        if let Some(err) = self.next_show_error.write().await.take() {
            return Err(err);
        }

        Ok(self
            .shows
            .read()
            .await
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn search_episodes(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<EpisodeExternal>, DirectoryError> {
        self.record(RecordedDirectoryQuery::Episodes {
            term: term.to_string(),
            limit,
        })
        .await;

        if let Some(err) = self.next_episode_error.write().await.take() {
            return Err(err);
        }

        Ok(self
            .episodes
            .read()
            .await
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
