//! Board model: three pegs of disks and the invariants that bind them.
//!
//! Each peg is listed bottom-to-top. Disk `1` is the smallest; a game of `N`
//! disks contains every id in `1..=N` exactly once, and ids strictly decrease
//! from the bottom of a peg to its top.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

/// Number of pegs on every board.
pub const PEG_COUNT: usize = 3;

/// Disk identifier. `1` is the smallest disk.
pub type Disk = u32;

/// Reasons a board snapshot violates the model invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A disk id is zero or larger than the number of disks on the board.
    #[error("disk {disk} is outside 1..={max}")]
    DiskOutOfRange { disk: Disk, max: Disk },
    /// The same disk id appears more than once.
    #[error("disk {0} appears more than once")]
    DuplicateDisk(Disk),
    /// A larger disk rests on a smaller one.
    #[error("peg {peg}: disk {above} rests on smaller disk {below}")]
    OutOfOrder { peg: usize, below: Disk, above: Disk },
    /// The board does not hold the expected number of disks.
    #[error("expected {expected} disks, found {found}")]
    DiskCountMismatch { expected: Disk, found: Disk },
}

/// Why a single-disk move was refused. Peg numbers in messages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("Invalid move: peg {} does not exist.", .0 + 1)]
    PegOutOfRange(usize),
    #[error("Invalid move: source and destination are the same peg.")]
    SamePeg,
    #[error("Invalid move: peg {} is empty.", .0 + 1)]
    EmptySource(usize),
    #[error("Invalid move: cannot place disk {disk} on top of smaller disk {onto}.")]
    LargerOnSmaller { disk: Disk, onto: Disk },
}

/// Arrangement of disks over the three pegs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    pegs: [Vec<Disk>; PEG_COUNT],
}

impl Board {
    /// Board with every peg empty.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starting arrangement: all `disks` stacked on the first peg.
    #[must_use]
    pub fn new_game(disks: Disk) -> Self {
        let mut board = Self::empty();
        board.pegs[0] = (1..=disks).rev().collect();
        board
    }

    /// Build a board from raw pegs without checking invariants.
    #[must_use]
    pub fn from_pegs(pegs: [Vec<Disk>; PEG_COUNT]) -> Self {
        Self { pegs }
    }

    #[must_use]
    pub fn pegs(&self) -> &[Vec<Disk>; PEG_COUNT] {
        &self.pegs
    }

    /// Disks on `peg`, bottom-to-top. `None` when the index is out of range.
    #[must_use]
    pub fn peg(&self, peg: usize) -> Option<&[Disk]> {
        self.pegs.get(peg).map(Vec::as_slice)
    }

    /// Topmost disk on `peg`, if any.
    #[must_use]
    pub fn top(&self, peg: usize) -> Option<Disk> {
        self.pegs.get(peg).and_then(|p| p.last().copied())
    }

    /// Whether the disk at `index` (counted from the bottom) is the top of `peg`.
    #[must_use]
    pub fn is_top(&self, peg: usize, index: usize) -> bool {
        self.pegs
            .get(peg)
            .is_some_and(|p| !p.is_empty() && index == p.len() - 1)
    }

    /// Total number of disks across all pegs.
    #[must_use]
    pub fn disk_count(&self) -> Disk {
        let total: usize = self.pegs.iter().map(Vec::len).sum();
        Disk::try_from(total).unwrap_or(Disk::MAX)
    }

    /// Largest disk id present, or `0` for an empty board.
    #[must_use]
    pub fn max_disk(&self) -> Disk {
        self.pegs.iter().flatten().copied().max().unwrap_or(0)
    }

    /// All disks sit on the last peg.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.pegs[..PEG_COUNT - 1].iter().all(Vec::is_empty) && !self.pegs[PEG_COUNT - 1].is_empty()
    }

    /// Check the invariants, inferring `N` from the number of disks present.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<Disk, BoardError> {
        let max = self.disk_count();
        let mut seen = vec![false; max as usize + 1];

        for (peg, disks) in self.pegs.iter().enumerate() {
            for (i, &disk) in disks.iter().enumerate() {
                if disk == 0 || disk > max {
                    return Err(BoardError::DiskOutOfRange { disk, max });
                }
                let slot = &mut seen[disk as usize];
                if *slot {
                    return Err(BoardError::DuplicateDisk(disk));
                }
                *slot = true;

                if i > 0 && disks[i - 1] <= disk {
                    return Err(BoardError::OutOfOrder { peg, below: disks[i - 1], above: disk });
                }
            }
        }
        Ok(max)
    }

    /// Check the invariants for a game of exactly `expected` disks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DiskCountMismatch`] when the count differs,
    /// otherwise the first violated invariant.
    pub fn validate_for(&self, expected: Disk) -> Result<(), BoardError> {
        let found = self.disk_count();
        if found != expected {
            return Err(BoardError::DiskCountMismatch { expected, found });
        }
        self.validate().map(|_| ())
    }

    /// Check whether moving the top disk of `src` onto `dst` is legal.
    ///
    /// # Errors
    ///
    /// Returns the reason the move is illegal.
    pub fn check_move(&self, src: usize, dst: usize) -> Result<Disk, IllegalMove> {
        if src >= PEG_COUNT {
            return Err(IllegalMove::PegOutOfRange(src));
        }
        if dst >= PEG_COUNT {
            return Err(IllegalMove::PegOutOfRange(dst));
        }
        if src == dst {
            return Err(IllegalMove::SamePeg);
        }
        let disk = self.top(src).ok_or(IllegalMove::EmptySource(src))?;
        if let Some(onto) = self.top(dst)
            && onto < disk
        {
            return Err(IllegalMove::LargerOnSmaller { disk, onto });
        }
        Ok(disk)
    }

    /// Move the top disk of `src` onto `dst`, returning the moved disk.
    ///
    /// # Errors
    ///
    /// Leaves the board untouched and returns the reason when illegal.
    pub fn move_top(&mut self, src: usize, dst: usize) -> Result<Disk, IllegalMove> {
        let disk = self.check_move(src, dst)?;
        self.pegs[src].pop();
        self.pegs[dst].push(disk);
        Ok(disk)
    }
}
