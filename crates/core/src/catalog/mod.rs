//! Show cache - the local copy of show metadata seen in searches.
//!
//! Records are keyed by the directory's identifier. Writing a show that is
//! already cached replaces it in place; there is no delete path.

mod sqlite;
mod types;

pub use sqlite::SqliteShowStore;
pub use types::*;

use async_trait::async_trait;

/// Trait for show cache storage.
///
/// Implementations must make `upsert` atomic per key: two concurrent writes
/// for the same `external_id` leave exactly one record, equal to one of the
/// two inputs in full.
#[async_trait]
pub trait ShowStore: Send + Sync {
    /// Insert or replace the show keyed by `input.external_id`.
    ///
    /// A new record gets `created_at == updated_at == now`. An existing
    /// record keeps its `created_at`; every other field is replaced and
    /// `updated_at` is set to now.
    async fn upsert(&self, input: ShowRecordInput) -> Result<ShowRecord, ShowStoreError>;

    /// Get a cached show by directory identifier.
    async fn get(&self, external_id: i64) -> Result<ShowRecord, ShowStoreError>;

    /// List cached shows, most recently updated first.
    async fn list(&self, query: &ShowListQuery) -> Result<Vec<ShowRecord>, ShowStoreError>;

    /// Number of cached shows.
    async fn count(&self) -> Result<u64, ShowStoreError>;
}
