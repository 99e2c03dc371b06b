//! In-memory game service for session and render loop tests.

use std::sync::{Mutex, PoisonError};

use board::wire::StartResponse;
use board::{Board, Disk, Game, GameError, MoveOutcome};

use crate::net::{GameApi, SyncError};

/// [`GameApi`] backed by a local [`Game`], recording every call by name.
#[derive(Default)]
pub(crate) struct MockApi {
    game: Mutex<Game>,
    calls: Mutex<Vec<&'static str>>,
    fail_on: Mutex<Option<(&'static str, SyncError)>>,
    state_override: Mutex<Option<Board>>,
}

impl MockApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    /// Fail the next call named `call` with `err`.
    pub(crate) fn fail_next(&self, call: &'static str, err: SyncError) {
        *self.fail_on.lock().unwrap_or_else(PoisonError::into_inner) = Some((call, err));
    }

    /// Serve `board` from `fetch_state` instead of the game's board.
    pub(crate) fn serve_state(&self, board: Board) {
        *self.state_override.lock().unwrap_or_else(PoisonError::into_inner) = Some(board);
    }

    pub(crate) fn game_board(&self) -> Board {
        self.game.lock().unwrap_or_else(PoisonError::into_inner).board().clone()
    }

    fn enter(&self, call: &'static str) -> Result<(), SyncError> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
        let mut fail_on = self.fail_on.lock().unwrap_or_else(PoisonError::into_inner);
        if fail_on.as_ref().is_some_and(|(name, _)| *name == call) {
            if let Some((_, err)) = fail_on.take() {
                return Err(err);
            }
        }
        Ok(())
    }

    fn with_game<T>(&self, f: impl FnOnce(&mut Game) -> T) -> T {
        f(&mut self.game.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

fn game_error(err: &GameError) -> SyncError {
    let status = match err {
        GameError::InvalidRingCount { .. } => 400,
        GameError::NotStarted => 409,
    };
    SyncError::Rejected { status, message: err.to_string() }
}

#[async_trait::async_trait]
impl GameApi for MockApi {
    async fn start_game(&self, rings: Disk) -> Result<StartResponse, SyncError> {
        self.enter("start")?;
        self.with_game(|g| g.start(rings)).map_err(|e| game_error(&e))?;
        Ok(StartResponse { rings })
    }

    async fn attempt_move(&self, src: usize, dst: usize) -> Result<MoveOutcome, SyncError> {
        self.enter("move")?;
        Ok(self.with_game(|g| g.try_move(src, dst)))
    }

    async fn undo_last_move(&self) -> Result<(), SyncError> {
        self.enter("undo")?;
        self.with_game(Game::undo);
        Ok(())
    }

    async fn fetch_state(&self) -> Result<Board, SyncError> {
        self.enter("state")?;
        if let Some(board) = self.state_override.lock().unwrap_or_else(PoisonError::into_inner).take() {
            return Ok(board);
        }
        Ok(self.game_board())
    }

    async fn request_solution(&self) -> Result<Vec<Board>, SyncError> {
        self.enter("solve")?;
        self.with_game(Game::solve).map_err(|e| game_error(&e))
    }
}
