//! iTunes Search API client.
//!
//! The search endpoint is public and needs no API key. Shows and episodes
//! are fetched from the same endpoint with a different `entity` filter.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{DirectorySearchResponse, EpisodeExternal, ShowExternal};
use super::{DirectoryError, PodcastDirectory, DEFAULT_SEARCH_LIMIT};
use crate::metrics::{DIRECTORY_DURATION, DIRECTORY_REQUESTS};

const MEDIA_PODCAST: &str = "podcast";
const ENTITY_SHOW: &str = "podcast";
const ENTITY_EPISODE: &str = "podcastEpisode";

/// iTunes client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItunesConfig {
    /// Search endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Storefront country code.
    #[serde(default = "default_country")]
    pub country: String,
    /// Results requested per query.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ItunesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            country: default_country(),
            limit: default_limit(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://itunes.apple.com/search".to_string()
}

fn default_country() -> String {
    "SA".to_string()
}

fn default_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

fn default_timeout() -> u32 {
    30
}

/// iTunes Search API client.
pub struct ItunesClient {
    client: Client,
    base_url: String,
    country: String,
}

impl ItunesClient {
    /// Create a new iTunes client.
    pub fn new(config: ItunesConfig) -> Result<Self, DirectoryError> {
        if config.base_url.is_empty() {
            return Err(DirectoryError::NotConfigured(
                "iTunes base URL is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            country: config.country,
        })
    }

    async fn search<T: DeserializeOwned>(
        &self,
        term: &str,
        entity: &str,
        limit: u32,
    ) -> Result<Vec<T>, DirectoryError> {
        debug!(
            "iTunes search: term='{}', entity={}, limit={}",
            term, entity, limit
        );

        let start = Instant::now();
        let result = self.fetch(term, entity, limit).await;

        DIRECTORY_DURATION
            .with_label_values(&[entity])
            .observe(start.elapsed().as_secs_f64());
        let status = if result.is_ok() { "success" } else { "error" };
        DIRECTORY_REQUESTS
            .with_label_values(&[entity, status])
            .inc();

        result
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        term: &str,
        entity: &str,
        limit: u32,
    ) -> Result<Vec<T>, DirectoryError> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("term", term),
                ("media", MEDIA_PODCAST),
                ("entity", entity),
                ("limit", limit.as_str()),
                ("country", self.country.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(DirectoryError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        // iTunes answers with text/javascript, so decode the body ourselves.
        let body = response.text().await?;
        let search_result: DirectorySearchResponse<T> =
            serde_json::from_str(&body).map_err(|e| {
                DirectoryError::ParseError(format!(
                    "Failed to parse {} search response: {}",
                    entity, e
                ))
            })?;

        if search_result.result_count as usize != search_result.results.len() {
            debug!(
                "iTunes resultCount {} differs from {} results received",
                search_result.result_count,
                search_result.results.len()
            );
        }

        Ok(search_result.results)
    }
}

#[async_trait]
impl PodcastDirectory for ItunesClient {
    fn name(&self) -> &str {
        "itunes"
    }

    async fn search_shows(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<ShowExternal>, DirectoryError> {
        self.search(term, ENTITY_SHOW, limit).await
    }

    async fn search_episodes(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<EpisodeExternal>, DirectoryError> {
        self.search(term, ENTITY_EPISODE, limit).await
    }
}
