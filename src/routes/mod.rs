//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The game API lives at the root (`/start`, `/move`, `/undo`, `/state`,
//! `/solve`) so existing browser clients keep working. When a static
//! directory is configured it answers every other path, which is how the
//! browser UI is served next to the API.

pub mod game;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Game API routes.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/start", post(game::start))
        .route("/move", post(game::make_move))
        .route("/undo", post(game::undo))
        .route("/state", get(game::state))
        .route("/solve", post(game::solve))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application: API routes, plus `static_dir` as fallback when given.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = api_routes(state);
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    };
    router.layer(CompressionLayer::new()).layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
