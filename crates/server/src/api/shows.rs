//! Show cache API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use podsearch_core::{ShowListQuery, ShowRecord, ShowStoreError};
use serde::{Deserialize, Serialize};

use super::handlers::ErrorResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ShowsQueryParams {
    /// Only shows last written by this search term
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    100
}

#[derive(Debug, Serialize)]
pub struct ShowListResponse {
    pub shows: Vec<ShowRecord>,
    pub total: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/shows
///
/// List cached shows, most recently updated first.
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ShowsQueryParams>,
) -> Result<Json<ShowListResponse>, impl IntoResponse> {
    let query = ShowListQuery {
        search_term: params
            .term
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        limit: params.limit,
    };

    match state.store().list(&query).await {
        Ok(shows) => {
            let total = shows.len();
            Ok(Json(ShowListResponse { shows, total }))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// GET /api/shows/{id}
///
/// Get a single cached show by directory id.
pub async fn get_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ShowRecord>, impl IntoResponse> {
    match state.store().get(id).await {
        Ok(show) => Ok(Json(show)),
        Err(ShowStoreError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Show {} not found", id),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
