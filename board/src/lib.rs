//! Shared Tower of Hanoi model and wire types.
//!
//! This crate owns the board representation used by the game service, the
//! client sync layer and the canvas engine. Boards travel as plain JSON
//! (`[[3,2,1],[],[]]`, each peg listed bottom-to-top) so any HTTP client can
//! talk to the service.
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | [`Board`], invariants and single-disk moves |
//! | [`game`] | Authoritative rules engine with undo history and solver |
//! | [`wire`] | Request/response bodies of the HTTP API |

pub mod game;
pub mod model;
pub mod wire;

pub use game::{Game, GameError};
pub use model::{Board, BoardError, Disk, IllegalMove, PEG_COUNT};
pub use wire::MoveOutcome;
