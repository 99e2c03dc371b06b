//! Game routes.
//!
//! Parameters travel in the query string (`POST /move?src=0&dst=2`). Requests
//! with missing or non-numeric parameters are turned away by the `Query`
//! extractor with `400` before reaching the game.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use board::wire::{SolveResponse, StartResponse, StateResponse, UndoResponse};
use board::{Disk, GameError, MoveOutcome};
use serde::Deserialize;

use crate::services::game as service;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartQuery {
    pub rings: Disk,
}

#[derive(Debug, Deserialize)]
pub struct MoveQuery {
    pub src: usize,
    pub dst: usize,
}

type ApiError = (StatusCode, String);

/// `POST /start?rings=N`: reset to `N` disks on the first peg.
pub async fn start(
    State(state): State<AppState>,
    Query(query): Query<StartQuery>,
) -> Result<Json<StartResponse>, ApiError> {
    service::start(&state, query.rings).await.map(Json).map_err(api_error)
}

/// `POST /move?src=I&dst=J`: `[accepted, message]`; illegal moves are `200`.
pub async fn make_move(State(state): State<AppState>, Query(query): Query<MoveQuery>) -> Json<MoveOutcome> {
    Json(service::make_move(&state, query.src, query.dst).await)
}

/// `POST /undo`: revert the last accepted move, if any.
pub async fn undo(State(state): State<AppState>) -> Json<UndoResponse> {
    Json(service::undo(&state).await)
}

/// `GET /state`: current board, disk count and undo depth.
pub async fn state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(service::snapshot(&state).await)
}

/// `POST /solve`: snapshots after each solving move.
pub async fn solve(State(state): State<AppState>) -> Result<Json<SolveResponse>, ApiError> {
    service::solve(&state).await.map(Json).map_err(api_error)
}

fn api_error(err: GameError) -> ApiError {
    (game_error_to_status(&err), err.to_string())
}

pub(crate) fn game_error_to_status(err: &GameError) -> StatusCode {
    match err {
        GameError::InvalidRingCount { .. } => StatusCode::BAD_REQUEST,
        GameError::NotStarted => StatusCode::CONFLICT,
    }
}
