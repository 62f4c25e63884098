//! In-memory show store for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{ShowListQuery, ShowRecord, ShowRecordInput, ShowStore, ShowStoreError};

/// In-memory implementation of the ShowStore trait.
///
/// Each upsert replaces the whole record under a single write lock. Tests
/// can make writes for a given id slow or failing to control interleaving.
#[derive(Debug, Default)]
pub struct MemoryShowStore {
    shows: Arc<RwLock<HashMap<i64, ShowRecord>>>,
    /// Upserts for these ids fail with the given error.
    failures: Arc<RwLock<HashMap<i64, ShowStoreError>>>,
    /// Upserts for these ids wait before writing.
    delays: Arc<RwLock<HashMap<i64, Duration>>>,
}

impl MemoryShowStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upsert for `external_id` fail with `error`.
    pub async fn fail_on(&self, external_id: i64, error: ShowStoreError) {
        self.failures.write().await.insert(external_id, error);
    }

    /// Make every upsert for `external_id` wait `delay` before writing.
    pub async fn set_delay(&self, external_id: i64, delay: Duration) {
        self.delays.write().await.insert(external_id, delay);
    }

    /// Stored ids in ascending order.
    pub async fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.shows.read().await.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl ShowStore for MemoryShowStore {
    async fn upsert(&self, input: ShowRecordInput) -> Result<ShowRecord, ShowStoreError> {
        let external_id = input.external_id;

        let delay = self.delays.read().await.get(&external_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.failures.read().await.get(&external_id).cloned() {
            return Err(err);
        }

        let mut shows = self.shows.write().await;
        let now = Utc::now();
        let created_at = shows
            .get(&external_id)
            .map(|existing| existing.created_at)
            .unwrap_or(now);
        let record = ShowRecord::from_input(input, created_at, now);
        shows.insert(external_id, record.clone());

        Ok(record)
    }

    async fn get(&self, external_id: i64) -> Result<ShowRecord, ShowStoreError> {
        self.shows
            .read()
            .await
            .get(&external_id)
            .cloned()
            .ok_or_else(|| ShowStoreError::NotFound(format!("show {}", external_id)))
    }

    async fn list(&self, query: &ShowListQuery) -> Result<Vec<ShowRecord>, ShowStoreError> {
        let shows = self.shows.read().await;
        let mut matching: Vec<ShowRecord> = shows
            .values()
            .filter(|s| {
                query
                    .search_term
                    .as_ref()
                    .map_or(true, |term| &s.search_term == term)
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then(a.external_id.cmp(&b.external_id))
        });
        matching.truncate(query.limit as usize);

        Ok(matching)
    }

    async fn count(&self) -> Result<u64, ShowStoreError> {
        Ok(self.shows.read().await.len() as u64)
    }
}
