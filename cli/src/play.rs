//! Interactive play: one command per line against a [`Session`].

#[cfg(test)]
#[path = "play_test.rs"]
mod play_test;

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use client::animation::spawn_render_loop;
use client::{Session, TokioClock};

use crate::CliError;
use crate::ascii::{AsciiSurface, render_board};

pub const HELP: &str = "\
commands:
  start <N>        new game with N rings (1-10)
  select <P>       pick a source peg, then a target peg (1-3)
  move <A> <B>     move the top ring of peg A onto peg B
  undo             revert the last move
  restart          start over with the same ring count
  solve            reset and play the solution
  state            redraw the board
  help             this text
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Start(String),
    Select(usize),
    Move { src: usize, dst: usize },
    Undo,
    Restart,
    Solve,
    State,
    Help,
    Quit,
}

/// Parse one input line. Pegs are typed 1-based and returned 0-based.
///
/// # Errors
///
/// [`CliError::Usage`] for unknown commands or malformed arguments. An empty
/// line parses as [`PlayCommand::State`].
pub fn parse_command(line: &str) -> Result<PlayCommand, CliError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        [] | ["state"] => PlayCommand::State,
        ["start", n] => PlayCommand::Start((*n).to_owned()),
        ["select" | "s", peg] => PlayCommand::Select(parse_peg(peg)?),
        ["move" | "m", src, dst] => PlayCommand::Move { src: parse_peg(src)?, dst: parse_peg(dst)? },
        ["undo" | "u"] => PlayCommand::Undo,
        ["restart"] => PlayCommand::Restart,
        ["solve"] => PlayCommand::Solve,
        ["help" | "?"] => PlayCommand::Help,
        ["quit" | "q" | "exit"] => PlayCommand::Quit,
        _ => return Err(CliError::Usage(format!("unrecognized command `{}`; type `help`", line.trim()))),
    };
    Ok(command)
}

/// Parse a 1-based peg number into a 0-based index.
///
/// # Errors
///
/// [`CliError::Usage`] unless `raw` is 1, 2 or 3.
pub fn parse_peg(raw: &str) -> Result<usize, CliError> {
    match raw.parse::<usize>() {
        Ok(peg @ 1..=3) => Ok(peg - 1),
        _ => Err(CliError::Usage(format!("`{raw}` is not a peg; use 1, 2 or 3"))),
    }
}

/// Read commands from stdin until `quit` or end of input.
///
/// Session errors are printed and the loop continues; only I/O failures end
/// it early.
pub async fn run(session: Arc<Session>, poll: Duration) -> Result<(), CliError> {
    println!("{HELP}");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("hanoi> ");
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == PlayCommand::Help {
            println!("{HELP}");
            continue;
        }
        let quitting = command == PlayCommand::Quit;
        if let Err(err) = execute(&session, command, poll).await {
            if matches!(err, CliError::Session(_)) {
                println!("{err}");
            } else {
                return Err(err);
            }
        }
        show(&session);
        if quitting {
            return Ok(());
        }
    }
}

async fn execute(session: &Arc<Session>, command: PlayCommand, poll: Duration) -> Result<(), CliError> {
    match command {
        PlayCommand::Start(n) => session.start_game(&n).await?,
        PlayCommand::Select(peg) => {
            session.select_peg(peg).await?;
        }
        PlayCommand::Move { src, dst } => {
            session.attempt_move(src, dst).await?;
        }
        PlayCommand::Undo => session.undo().await?,
        PlayCommand::Restart => session.restart().await?,
        PlayCommand::Solve => watch_solve(session, poll).await?,
        PlayCommand::Quit => session.quit()?,
        PlayCommand::State | PlayCommand::Help => {}
    }
    Ok(())
}

/// Play the solution while the render loop prints each board it shows.
async fn watch_solve(session: &Session, poll: Duration) -> Result<(), CliError> {
    let painter = spawn_render_loop(session, AsciiSurface::new(io::stdout()), Arc::new(TokioClock), poll);
    let solved = session.auto_solve().await;
    painter.abort();
    solved?;
    Ok(())
}

fn show(session: &Session) {
    if session.is_started() {
        println!("{}", render_board(&session.board(), session.disks()));
    }
    let status = session.status();
    if !status.is_empty() {
        println!("{status}");
    }
}
