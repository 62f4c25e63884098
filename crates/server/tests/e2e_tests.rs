//! End-to-end tests with a mocked podcast directory.
//!
//! These tests run the full server stack in-process with a mock directory
//! and a real SQLite show cache.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use podsearch_core::testing::MemoryShowStore;
use podsearch_core::{DirectoryError, ShowStore, ShowStoreError};

use common::{fixtures, TestFixture};

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["server"]["port"], 3001);
    assert_eq!(response.body["directory"]["country"], "SA");
    assert_eq!(response.body["directory"]["limit"], 20);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/episodes").await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

// =============================================================================
// Search Tests
// =============================================================================

#[tokio::test]
async fn test_search_returns_shows_and_episodes() {
    let fixture = TestFixture::new().await;
    fixture
        .directory()
        .set_shows(vec![
            fixtures::show_external(111, "Morning News"),
            fixtures::show_external(222, "Evening News"),
        ])
        .await;
    fixture
        .directory()
        .set_episodes(vec![fixtures::episode_external(9001, 111, "Monday Briefing")])
        .await;

    let response = fixture.get("/api/search?term=news").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["term"], "news");

    let shows = response.body["shows"].as_array().unwrap();
    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0]["external_id"], 111);
    assert_eq!(shows[0]["name"], "Morning News");
    assert_eq!(shows[0]["search_term"], "news");
    assert!(shows[0]["created_at"].is_string());
    assert_eq!(shows[1]["external_id"], 222);

    let episodes = response.body["episodes"].as_array().unwrap();
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0]["external_id"], 9001);
    assert_eq!(episodes[0]["show_id"], 111);

    assert_eq!(fixture.store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_search_decodes_term() {
    let fixture = TestFixture::new().await;
    fixture
        .directory()
        .set_shows(vec![fixtures::show_external(1, "Daily Tech")])
        .await;

    let response = fixture.get("/api/search?term=%20tech%20news%20").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["term"], "tech news");
    let queries = fixture.directory().recorded_queries().await;
    assert!(queries.iter().all(|q| q.term() == "tech news"));
}

#[tokio::test]
async fn test_search_without_term_is_400() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/search").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());

    let response = fixture.get("/api/search?term=%20%20").await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    assert_eq!(fixture.directory().query_count().await, 0);
}

#[tokio::test]
async fn test_search_directory_failure_is_503() {
    let fixture = TestFixture::new().await;
    fixture
        .directory()
        .set_shows(vec![fixtures::show_external(111, "Morning News")])
        .await;
    fixture
        .directory()
        .set_next_show_error(DirectoryError::ApiError {
            status: 500,
            message: "internal".to_string(),
        })
        .await;

    let response = fixture.get("/api/search?term=x").await;

    assert_status!(response, StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.body["error"].as_str().unwrap().contains("'x'"));
    assert_eq!(fixture.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_search_episode_failure_still_succeeds() {
    let fixture = TestFixture::new().await;
    fixture
        .directory()
        .set_shows(vec![fixtures::show_external(111, "Morning News")])
        .await;
    fixture
        .directory()
        .set_episodes(vec![fixtures::episode_external(9001, 111, "Monday Briefing")])
        .await;
    fixture
        .directory()
        .set_next_episode_error(DirectoryError::RateLimitExceeded)
        .await;

    let response = fixture.get("/api/search?term=news").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["shows"].as_array().unwrap().len(), 1);
    assert!(response.body["episodes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_cache_failure_is_500() {
    let store = Arc::new(MemoryShowStore::new());
    store
        .fail_on(222, ShowStoreError::Database("disk full".to_string()))
        .await;
    let fixture = TestFixture::with_store(store.clone());
    fixture
        .directory()
        .set_shows(vec![
            fixtures::show_external(111, "Morning News"),
            fixtures::show_external(222, "Evening News"),
        ])
        .await;

    let response = fixture.get("/api/search?term=news").await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"].is_string());
    assert!(response.body.get("shows").is_none());
    // The sibling write still lands.
    assert_eq!(store.ids().await, vec![111]);
}

#[tokio::test]
async fn test_search_serializes_absent_fields_as_null() {
    let fixture = TestFixture::new().await;
    let mut show = fixtures::show_external(111, "Morning News");
    show.feed_url = None;
    fixture.directory().set_shows(vec![show]).await;

    let response = fixture.get("/api/search?term=news").await;

    assert_status!(response, StatusCode::OK);
    let show = &response.body["shows"][0];
    assert!(show.as_object().unwrap().contains_key("feed_url"));
    assert!(show["feed_url"].is_null());
}

#[tokio::test]
async fn test_repeat_search_keeps_one_record_per_show() {
    let fixture = TestFixture::new().await;
    fixture
        .directory()
        .set_shows(vec![
            fixtures::show_external(111, "Morning News"),
            fixtures::show_external(222, "Evening News"),
        ])
        .await;

    let first = fixture.get("/api/search?term=news").await;
    let second = fixture.get("/api/search?term=news").await;

    assert_status!(first, StatusCode::OK);
    assert_status!(second, StatusCode::OK);
    assert_eq!(fixture.store.count().await.unwrap(), 2);
    assert_eq!(
        first.body["shows"][0]["created_at"],
        second.body["shows"][0]["created_at"]
    );
}

// =============================================================================
// Show Cache Tests
// =============================================================================

#[tokio::test]
async fn test_list_shows() {
    let fixture = TestFixture::new().await;
    fixture
        .directory()
        .set_shows(vec![
            fixtures::show_external(111, "Morning News"),
            fixtures::show_external(222, "Evening News"),
        ])
        .await;
    fixture.get("/api/search?term=news").await;

    fixture
        .directory()
        .set_shows(vec![fixtures::show_external(333, "Tech Talk")])
        .await;
    fixture.get("/api/search?term=tech").await;

    let response = fixture.get("/api/shows").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 3);

    let response = fixture.get("/api/shows?term=tech").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["shows"][0]["external_id"], 333);

    let response = fixture.get("/api/shows?limit=2").await;
    assert_eq!(response.body["shows"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_show() {
    let fixture = TestFixture::new().await;
    fixture
        .directory()
        .set_shows(vec![fixtures::show_external(111, "Morning News")])
        .await;
    fixture.get("/api/search?term=news").await;

    let response = fixture.get("/api/shows/111").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["name"], "Morning News");
    assert_eq!(response.body["primary_genre"], "News");
    assert_eq!(response.body["release_date"], "2024-05-01T09:45:00Z");
}

#[tokio::test]
async fn test_get_missing_show_is_404() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/shows/424242").await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_get_show_with_non_numeric_id_is_400() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/shows/abc").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Ambient Endpoints
// =============================================================================

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    fixture.get("/api/health").await;

    let (status, body) = fixture.get_text("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("podsearch_http_requests_total"));
    assert!(body.contains("podsearch_shows_cached"));
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let fixture = TestFixture::new().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/search?term=news")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = fixture.send_raw(request).await;
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let fixture = TestFixture::new().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = fixture.send_raw(request).await;
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

