/// Catalog API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use aria_catalog::SortOrder;
use aria_core::Track;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    #[serde(default)]
    pub q: Option<String>,

    /// "desc" (default) or "asc" by creation date
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TracksResponse {
    pub tracks: Vec<Track>,
    pub total: usize,
}

/// GET /api/tracks
pub async fn list_tracks(
    State(app_state): State<AppState>,
    Query(query): Query<TrackQuery>,
) -> Json<TracksResponse> {
    let order = query
        .sort
        .as_deref()
        .map(SortOrder::parse)
        .unwrap_or_default();
    let tracks = app_state
        .catalog
        .filtered(query.q.as_deref().unwrap_or(""), order);
    let total = tracks.len();

    Json(TracksResponse { tracks, total })
}

/// GET /api/tracks/:id
pub async fn get_track(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Track>> {
    app_state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("track {id}")))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub track_count: usize,
    pub generated_at: String,
    pub favorite_count: usize,
    pub models: Vec<String>,
}

/// GET /api/stats - catalog summary
pub async fn stats(State(app_state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        track_count: app_state.catalog.len(),
        generated_at: app_state.catalog.generated_at().to_string(),
        favorite_count: app_state.catalog.favorite_count(),
        models: app_state.catalog.models(),
    })
}
