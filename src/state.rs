//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! service hosts exactly one game; every handler goes through the same
//! `RwLock<Game>`, so moves, undos and solves are applied one at a time.

use std::sync::Arc;

use board::{Disk, Game};
use tokio::sync::RwLock;

/// Clone is required by Axum; the game sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub game: Arc<RwLock<Game>>,
}

impl AppState {
    #[must_use]
    pub fn new(max_rings: Disk) -> Self {
        Self { game: Arc::new(RwLock::new(Game::with_max_rings(max_rings))) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self { game: Arc::new(RwLock::new(Game::new())) }
    }
}
