//! HTTP request/response bodies shared by the service and the client.
//!
//! The move endpoint keeps its historical two-element body
//! (`[true, "Moved disk 1 ..."]`). [`MoveOutcome`] is the typed view of it and
//! also accepts the object form `{"ok": true, "message": "..."}` when decoding.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};

use crate::model::Board;

/// Result of a move attempt. An illegal move is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MoveOutcomeWire", into = "(bool, String)")]
pub enum MoveOutcome {
    /// The service applied the move.
    Accepted { message: String },
    /// The service refused the move; its board is unchanged.
    Rejected { message: String },
}

impl MoveOutcome {
    #[must_use]
    pub fn accepted(message: impl Into<String>) -> Self {
        Self::Accepted { message: message.into() }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected { message: message.into() }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Human-readable status text, present in both outcomes.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Accepted { message } | Self::Rejected { message } => message,
        }
    }
}

impl From<MoveOutcome> for (bool, String) {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Accepted { message } => (true, message),
            MoveOutcome::Rejected { message } => (false, message),
        }
    }
}

/// Accepted encodings of a move result.
#[derive(Deserialize)]
#[serde(untagged)]
enum MoveOutcomeWire {
    Pair(bool, String),
    Tagged { ok: bool, message: String },
}

impl From<MoveOutcomeWire> for MoveOutcome {
    fn from(wire: MoveOutcomeWire) -> Self {
        let (ok, message) = match wire {
            MoveOutcomeWire::Pair(ok, message) | MoveOutcomeWire::Tagged { ok, message } => (ok, message),
        };
        if ok { Self::Accepted { message } } else { Self::Rejected { message } }
    }
}

/// `POST /start` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartResponse {
    pub rings: u32,
}

/// `POST /undo` response. Clients are free to ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoResponse {
    pub undone: bool,
}

/// `GET /state` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateResponse {
    pub board: Board,
    /// Disk count of the current game; `0` before the first start.
    #[serde(default)]
    pub rings: u32,
    /// Number of moves that can still be undone.
    #[serde(default)]
    pub moves: usize,
}

/// `POST /solve` response: one snapshot per solving move, reset state excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub steps: Vec<Board>,
}
