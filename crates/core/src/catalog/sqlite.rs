//! SQLite-backed show cache implementation.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use super::{ShowListQuery, ShowRecord, ShowRecordInput, ShowStore, ShowStoreError};

const SHOW_COLUMNS: &str = "external_id, name, artist, artwork_small_url, artwork_large_url, \
     feed_url, episode_count, primary_genre, release_date, search_term, created_at, updated_at";

/// SQLite-backed show cache.
///
/// A single connection is shared behind a mutex; every statement runs on
/// the blocking thread pool.
pub struct SqliteShowStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteShowStore {
    /// Create a new SQLite store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, ShowStoreError> {
        let conn = Connection::open(path).map_err(|e| ShowStoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory SQLite store (useful for testing).
    pub fn in_memory() -> Result<Self, ShowStoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| ShowStoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), ShowStoreError> {
        conn.execute_batch(
            r#"
            -- One row per directory show identifier
            CREATE TABLE IF NOT EXISTS shows (
                external_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                artist TEXT NOT NULL,
                artwork_small_url TEXT,
                artwork_large_url TEXT,
                feed_url TEXT,
                episode_count INTEGER,
                primary_genre TEXT,
                release_date TEXT,
                search_term TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_shows_search_term ON shows(search_term);
            CREATE INDEX IF NOT EXISTS idx_shows_updated_at ON shows(updated_at);
            "#,
        )
        .map_err(|e| ShowStoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, ShowStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, ShowStoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| ShowStoreError::Internal("connection lock poisoned".to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| ShowStoreError::Internal(format!("storage task failed: {}", e)))?
    }

    /// Convert a row selected with [`SHOW_COLUMNS`] to a ShowRecord.
    fn row_to_show(row: &rusqlite::Row) -> rusqlite::Result<ShowRecord> {
        let release_date: Option<String> = row.get(8)?;
        let created_at: String = row.get(10)?;
        let updated_at: String = row.get(11)?;

        Ok(ShowRecord {
            external_id: row.get(0)?,
            name: row.get(1)?,
            artist: row.get(2)?,
            artwork_small_url: row.get(3)?,
            artwork_large_url: row.get(4)?,
            feed_url: row.get(5)?,
            episode_count: row.get(6)?,
            primary_genre: row.get(7)?,
            release_date: release_date
                .map(|s| parse_timestamp(8, &s))
                .transpose()?,
            search_term: row.get(9)?,
            created_at: parse_timestamp(10, &created_at)?,
            updated_at: parse_timestamp(11, &updated_at)?,
        })
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

#[async_trait]
impl ShowStore for SqliteShowStore {
    async fn upsert(&self, input: ShowRecordInput) -> Result<ShowRecord, ShowStoreError> {
        self.with_conn(move |conn| {
            let now = format_timestamp(&Utc::now());
            let release_date = input.release_date.as_ref().map(format_timestamp);

            // Single statement: the insert-or-replace is atomic per key.
            let sql = format!(
                "INSERT INTO shows ({SHOW_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
                 ON CONFLICT(external_id) DO UPDATE SET
                    name = excluded.name,
                    artist = excluded.artist,
                    artwork_small_url = excluded.artwork_small_url,
                    artwork_large_url = excluded.artwork_large_url,
                    feed_url = excluded.feed_url,
                    episode_count = excluded.episode_count,
                    primary_genre = excluded.primary_genre,
                    release_date = excluded.release_date,
                    search_term = excluded.search_term,
                    updated_at = excluded.updated_at
                 RETURNING {SHOW_COLUMNS}"
            );

            conn.query_row(
                &sql,
                params![
                    input.external_id,
                    &input.name,
                    &input.artist,
                    &input.artwork_small_url,
                    &input.artwork_large_url,
                    &input.feed_url,
                    input.episode_count,
                    &input.primary_genre,
                    &release_date,
                    &input.search_term,
                    &now,
                ],
                Self::row_to_show,
            )
            .map_err(|e| ShowStoreError::Database(e.to_string()))
        })
        .await
    }

    async fn get(&self, external_id: i64) -> Result<ShowRecord, ShowStoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {SHOW_COLUMNS} FROM shows WHERE external_id = ?"),
                params![external_id],
                Self::row_to_show,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    ShowStoreError::NotFound(format!("show {}", external_id))
                }
                _ => ShowStoreError::Database(e.to_string()),
            })
        })
        .await
    }

    async fn list(&self, query: &ShowListQuery) -> Result<Vec<ShowRecord>, ShowStoreError> {
        let search_term = query.search_term.clone();
        let limit = query.limit as i64;

        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SHOW_COLUMNS} FROM shows
                     WHERE (?1 IS NULL OR search_term = ?1)
                     ORDER BY updated_at DESC, external_id
                     LIMIT ?2"
                ))
                .map_err(|e| ShowStoreError::Database(e.to_string()))?;

            let rows = stmt
                .query_map(params![search_term, limit], Self::row_to_show)
                .map_err(|e| ShowStoreError::Database(e.to_string()))?;

            let mut shows = Vec::new();
            for row in rows {
                shows.push(row.map_err(|e| ShowStoreError::Database(e.to_string()))?);
            }
            Ok(shows)
        })
        .await
    }

    async fn count(&self) -> Result<u64, ShowStoreError> {
        self.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM shows", [], |row| row.get(0))
                .map_err(|e| ShowStoreError::Database(e.to_string()))?;
            Ok(count as u64)
        })
        .await
    }
}
