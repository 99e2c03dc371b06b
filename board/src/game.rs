//! Authoritative rules engine: start, move, undo and solve.
//!
//! DESIGN
//! ======
//! `Game` owns the only mutable board. Every accepted move pushes the prior
//! snapshot onto the undo history, so undo restores it exactly. Solving
//! resets to the starting arrangement and replays the optimal sequence; the
//! returned steps exclude the reset state and the engine is left solved with
//! an empty history.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use crate::model::{Board, Disk, PEG_COUNT};
use crate::wire::MoveOutcome;

/// Largest disk count accepted by default.
pub const DEFAULT_MAX_RINGS: Disk = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid number of rings {rings}: expected 1..={max}")]
    InvalidRingCount { rings: Disk, max: Disk },
    #[error("no game in progress")]
    NotStarted,
}

/// Rules engine for a single board.
#[derive(Debug, Clone)]
pub struct Game {
    rings: Disk,
    max_rings: Disk,
    board: Board,
    history: Vec<Board>,
}

impl Default for Game {
    fn default() -> Self {
        Self::with_max_rings(DEFAULT_MAX_RINGS)
    }
}

impl Game {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine accepting up to `max_rings` disks.
    #[must_use]
    pub fn with_max_rings(max_rings: Disk) -> Self {
        Self { rings: 0, max_rings, board: Board::empty(), history: Vec::new() }
    }

    /// Disk count of the current game, `0` before the first start.
    #[must_use]
    pub fn rings(&self) -> Disk {
        self.rings
    }

    #[must_use]
    pub fn max_rings(&self) -> Disk {
        self.max_rings
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves that can be undone.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.rings > 0
    }

    /// Reset to a fresh board of `rings` disks on the first peg.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidRingCount`] outside `1..=max_rings`; the
    /// current game is left untouched.
    pub fn start(&mut self, rings: Disk) -> Result<(), GameError> {
        if rings == 0 || rings > self.max_rings {
            return Err(GameError::InvalidRingCount { rings, max: self.max_rings });
        }
        self.rings = rings;
        self.board = Board::new_game(rings);
        self.history.clear();
        Ok(())
    }

    /// Attempt to move the top disk of `src` onto `dst`.
    pub fn try_move(&mut self, src: usize, dst: usize) -> MoveOutcome {
        if !self.is_started() {
            return MoveOutcome::rejected("No game in progress.");
        }
        let before = self.board.clone();
        match self.board.move_top(src, dst) {
            Ok(disk) => {
                self.history.push(before);
                let mut message = format!("Moved disk {disk} from peg {} to peg {}.", src + 1, dst + 1);
                if self.board.is_solved() {
                    message.push_str(" Puzzle solved!");
                }
                MoveOutcome::accepted(message)
            }
            Err(illegal) => MoveOutcome::rejected(illegal.to_string()),
        }
    }

    /// Revert the last accepted move. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.board = previous;
                true
            }
            None => false,
        }
    }

    /// Reset and solve, returning the board after each solving move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotStarted`] when no game has been started.
    pub fn solve(&mut self) -> Result<Vec<Board>, GameError> {
        if !self.is_started() {
            return Err(GameError::NotStarted);
        }

        let mut board = Board::new_game(self.rings);
        let mut steps = Vec::with_capacity(solution_length(self.rings));
        for (src, dst) in solution_moves(self.rings) {
            if board.move_top(src, dst).is_err() {
                // The optimal sequence never produces an illegal move.
                break;
            }
            steps.push(board.clone());
        }

        self.board = board;
        self.history.clear();
        Ok(steps)
    }
}

/// Number of moves in the optimal solution for `rings` disks (`2^rings - 1`).
#[must_use]
pub fn solution_length(rings: Disk) -> usize {
    1_usize
        .checked_shl(rings)
        .map_or(usize::MAX, |n| n - 1)
}

/// Optimal `(src, dst)` sequence moving `rings` disks from the first peg to the last.
#[must_use]
pub fn solution_moves(rings: Disk) -> Vec<(usize, usize)> {
    let mut moves = Vec::with_capacity(solution_length(rings));
    push_moves(rings, 0, PEG_COUNT - 1, 1, &mut moves);
    moves
}

fn push_moves(rings: Disk, src: usize, dst: usize, via: usize, out: &mut Vec<(usize, usize)>) {
    if rings == 0 {
        return;
    }
    push_moves(rings - 1, src, via, dst, out);
    out.push((src, dst));
    push_moves(rings - 1, via, dst, src, out);
}
