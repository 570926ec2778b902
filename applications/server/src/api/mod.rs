/// API route modules
pub mod health;
pub mod sign;
pub mod stream;
pub mod tracks;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Build the API router (all routes nested under `/api`)
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        .route("/tracks", get(tracks::list_tracks))
        .route("/tracks/:id", get(tracks::get_track))
        .route("/stats", get(tracks::stats))
        .route("/sign", post(sign::sign))
        .route("/stream", get(stream::stream));

    Router::new().nest("/api", routes).with_state(state)
}
