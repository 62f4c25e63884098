//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock directory and a real SQLite show cache, enabling E2E testing
//! without network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use podsearch_core::{
    testing::MockDirectory, Config, DatabaseConfig, PodcastDirectory, SearchService, ShowStore,
    SqliteShowStore,
};
use podsearch_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use podsearch_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new().await;
///     fixture.directory().set_shows(vec![fixtures::show_external(111, "News")]).await;
///
///     let response = fixture.get("/api/search?term=news").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock directory, absent when a real client is wired in
    mock: Option<Arc<MockDirectory>>,
    /// The show cache behind the router
    pub store: Arc<dyn ShowStore>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with a mock directory and a SQLite cache.
    pub async fn new() -> Self {
        Self::build(None, None)
    }

    /// Mock directory in front of the given show store.
    pub fn with_store(store: Arc<dyn ShowStore>) -> Self {
        Self::build(None, Some(store))
    }

    /// Real directory implementation in front of a SQLite cache.
    pub fn with_directory(directory: Arc<dyn PodcastDirectory>) -> Self {
        Self::build(Some(directory), None)
    }

    fn build(
        directory: Option<Arc<dyn PodcastDirectory>>,
        store: Option<Arc<dyn ShowStore>>,
    ) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let config = Config {
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            ..Default::default()
        };

        let (directory, mock) = match directory {
            Some(directory) => (directory, None),
            None => {
                let mock = Arc::new(MockDirectory::new());
                (Arc::clone(&mock) as Arc<dyn PodcastDirectory>, Some(mock))
            }
        };

        let store: Arc<dyn ShowStore> = match store {
            Some(store) => store,
            None => Arc::new(SqliteShowStore::new(&db_path).expect("Failed to create show store")),
        };

        let search = SearchService::new(directory, Arc::clone(&store))
            .with_limit(config.directory.limit);
        let state = Arc::new(AppState::new(config, search, Arc::clone(&store)));

        let router = create_router(state);

        Self {
            router,
            mock,
            store,
            temp_dir,
        }
    }

    /// The mock directory, to configure results and failures.
    pub fn directory(&self) -> &MockDirectory {
        self.mock
            .as_deref()
            .expect("fixture was built with a real directory")
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    /// Send a request and keep the raw response (for header checks).
    pub async fn send_raw(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// Send an arbitrary request to the test server.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.send_raw(request).await;

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
