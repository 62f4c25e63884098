//! Search API handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use podsearch_core::{EpisodeRecord, SearchError, ShowRecord};
use serde::{Deserialize, Serialize};

use super::handlers::ErrorResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub term: String,
    pub shows: Vec<ShowRecord>,
    pub episodes: Vec<EpisodeRecord>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/search?term=...
///
/// Search the directory for shows and episodes, caching the shows found.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, impl IntoResponse> {
    let term = params.term.unwrap_or_default();

    match state.search().search(&term).await {
        Ok(result) => Ok(Json(SearchResponse {
            success: true,
            term: result.term,
            shows: result.shows,
            episodes: result.episodes,
        })),
        Err(e) => Err((
            status_for(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

fn status_for(error: &SearchError) -> StatusCode {
    match error {
        SearchError::Validation(_) => StatusCode::BAD_REQUEST,
        SearchError::RemoteUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        SearchError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
