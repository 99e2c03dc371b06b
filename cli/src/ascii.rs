//! Plain-text board drawing, and a render-loop surface that prints it.

#[cfg(test)]
#[path = "ascii_test.rs"]
mod ascii_test;

use std::io::Write;

use board::{Board, Disk, PEG_COUNT};
use client::animation::{Surface, View};
use tracing::warn;

/// Draw `board` as three columns, pegs numbered from 1, top row first.
///
/// Columns are sized for `disks` so the picture does not jump while a game
/// is played; a board holding more disks than that widens them.
#[must_use]
pub fn render_board(board: &Board, disks: Disk) -> String {
    let biggest = board.max_disk().max(disks).max(1) as usize;
    let width = 2 * biggest + 1;
    let tallest = board.pegs().iter().map(Vec::len).max().unwrap_or(0);
    let height = tallest.max(disks as usize) + 1;

    let mut lines = Vec::with_capacity(height + 2);
    for level in (0..height).rev() {
        let row: Vec<String> = board
            .pegs()
            .iter()
            .map(|stack| {
                let cell = stack.get(level).map_or_else(|| "|".to_owned(), |&disk| disk_bar(disk));
                format!("{cell:^width$}")
            })
            .collect();
        lines.push(row.join(" ").trim_end().to_owned());
    }

    lines.push("-".repeat(PEG_COUNT * width + PEG_COUNT - 1));
    let labels: Vec<String> = (1..=PEG_COUNT).map(|peg| format!("{peg:^width$}")).collect();
    lines.push(labels.join(" ").trim_end().to_owned());
    lines.join("\n")
}

fn disk_bar(disk: Disk) -> String {
    "=".repeat((2 * disk as usize).saturating_sub(1))
}

/// Prints the board each time the presented one changes.
///
/// Frames between changes are dropped; a terminal cannot show the camera.
pub struct AsciiSurface<W> {
    out: W,
    last: Option<Board>,
}

impl<W: Write> AsciiSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }
}

impl<W: Write + Send + 'static> Surface for AsciiSurface<W> {
    fn present(&mut self, view: &View) {
        if view.disks == 0 || self.last.as_ref() == Some(&view.board) {
            return;
        }
        let drawn = render_board(&view.board, view.disks);
        if let Err(err) = writeln!(self.out, "{drawn}\n").and_then(|()| self.out.flush()) {
            warn!(error = %err, "board write failed");
            return;
        }
        self.last = Some(view.board.clone());
    }
}
