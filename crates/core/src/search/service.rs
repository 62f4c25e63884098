//! The search aggregator.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::{SearchError, SearchResult};
use crate::catalog::{ShowRecord, ShowStore};
use crate::directory::{search_episodes_or_empty, PodcastDirectory, DEFAULT_SEARCH_LIMIT};
use crate::metrics::{SEARCHES_TOTAL, SEARCH_DURATION, SEARCH_RESULTS, SHOW_UPSERTS};
use crate::normalize::{to_episode_record, to_show_input};

/// Runs searches against a directory and caches the shows found.
pub struct SearchService {
    directory: Arc<dyn PodcastDirectory>,
    store: Arc<dyn ShowStore>,
    limit: u32,
}

impl SearchService {
    /// Create a service requesting the default number of results.
    pub fn new(directory: Arc<dyn PodcastDirectory>, store: Arc<dyn ShowStore>) -> Self {
        Self {
            directory,
            store,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Set the number of results requested per query.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Search shows and episodes for `term`.
    ///
    /// Fails when the show query fails or when any show cannot be cached.
    /// A failed episode query only yields an empty episode list.
    pub async fn search(&self, term: &str) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        let result = self.run(term).await;

        SEARCH_DURATION.observe(start.elapsed().as_secs_f64());
        match &result {
            Ok(r) => {
                SEARCHES_TOTAL.with_label_values(&["success"]).inc();
                info!(
                    term = %r.term,
                    shows = r.shows.len(),
                    episodes = r.episodes.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Search completed"
                );
            }
            Err(e) => {
                SEARCHES_TOTAL.with_label_values(&[e.kind()]).inc();
                warn!(error = %e, "Search failed");
            }
        }

        result
    }

    async fn run(&self, term: &str) -> Result<SearchResult, SearchError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(SearchError::Validation(
                "search term is required".to_string(),
            ));
        }

        let (shows, episodes) = tokio::join!(
            self.directory.search_shows(term, self.limit),
            search_episodes_or_empty(self.directory.as_ref(), term, self.limit),
        );

        let shows = shows.map_err(|source| SearchError::RemoteUnavailable {
            term: term.to_string(),
            source,
        })?;

        debug!(
            "Directory returned {} shows and {} episodes for '{}'",
            shows.len(),
            episodes.len(),
            term
        );

        let shows = self.cache_shows(term, shows).await?;
        let episodes: Vec<_> = episodes.into_iter().map(to_episode_record).collect();

        SEARCH_RESULTS
            .with_label_values(&["shows"])
            .observe(shows.len() as f64);
        SEARCH_RESULTS
            .with_label_values(&["episodes"])
            .observe(episodes.len() as f64);

        Ok(SearchResult {
            term: term.to_string(),
            shows,
            episodes,
        })
    }

    /// Upsert every show concurrently and return the records in directory order.
    ///
    /// All writes run to completion even if one fails; the first failure in
    /// directory order is then reported.
    async fn cache_shows(
        &self,
        term: &str,
        shows: Vec<crate::directory::ShowExternal>,
    ) -> Result<Vec<ShowRecord>, SearchError> {
        let upserts = shows.into_iter().map(|show| {
            let input = to_show_input(show, term);
            let store = Arc::clone(&self.store);
            async move {
                let external_id = input.external_id;
                (external_id, store.upsert(input).await)
            }
        });

        // join_all yields outcomes in input order, not completion order.
        let outcomes = join_all(upserts).await;

        let mut records = Vec::with_capacity(outcomes.len());
        let mut first_error = None;
        for (external_id, outcome) in outcomes {
            match outcome {
                Ok(record) => {
                    SHOW_UPSERTS.with_label_values(&["success"]).inc();
                    records.push(record);
                }
                Err(e) => {
                    SHOW_UPSERTS.with_label_values(&["failed"]).inc();
                    warn!(external_id, term, error = %e, "Failed to cache show");
                    if first_error.is_none() {
                        first_error = Some(SearchError::Persistence {
                            term: term.to_string(),
                            external_id,
                            source: e,
                        });
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(records),
        }
    }
}
