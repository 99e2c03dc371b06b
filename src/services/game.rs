//! Game service: start, move, undo, state and solve on the hosted game.
//!
//! DESIGN
//! ======
//! Each operation takes the game lock once and returns a wire body. Reads
//! (`snapshot`) share the lock; everything else holds it exclusively, so a
//! solve can never interleave with a move.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use board::wire::{SolveResponse, StartResponse, StateResponse, UndoResponse};
use board::{Disk, GameError, MoveOutcome};
use tracing::info;

use crate::state::AppState;

/// Reset the hosted game to `rings` disks on the first peg.
///
/// # Errors
///
/// [`GameError::InvalidRingCount`] outside `1..=max_rings`.
pub async fn start(state: &AppState, rings: Disk) -> Result<StartResponse, GameError> {
    state.game.write().await.start(rings)?;
    info!(rings, "game started");
    Ok(StartResponse { rings })
}

pub async fn make_move(state: &AppState, src: usize, dst: usize) -> MoveOutcome {
    let outcome = state.game.write().await.try_move(src, dst);
    info!(src, dst, accepted = outcome.is_ok(), "move attempted");
    outcome
}

pub async fn undo(state: &AppState) -> UndoResponse {
    let undone = state.game.write().await.undo();
    info!(undone, "undo requested");
    UndoResponse { undone }
}

pub async fn snapshot(state: &AppState) -> StateResponse {
    let game = state.game.read().await;
    StateResponse { board: game.board().clone(), rings: game.rings(), moves: game.moves() }
}

/// Solve from the starting arrangement. The hosted game ends solved.
///
/// # Errors
///
/// [`GameError::NotStarted`] before the first start.
pub async fn solve(state: &AppState) -> Result<SolveResponse, GameError> {
    let steps = state.game.write().await.solve()?;
    info!(steps = steps.len(), "solution computed");
    Ok(SolveResponse { steps })
}
