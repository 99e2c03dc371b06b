mod ascii;
mod play;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::sync::Arc;
use std::time::Duration;

use board::Disk;
use clap::{Parser, Subcommand};
use client::config::{DEFAULT_BASE_URL, DEFAULT_STEP_DELAY_MS};
use client::session::parse_disk_count;
use client::{ClientConfig, GameApi, HttpGameApi, Session, SessionError, SyncError, TokioClock};

use crate::ascii::render_board;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("no game in progress; run `start <N>` first")]
    NoGame,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "hanoi-cli", about = "Tower of Hanoi terminal client")]
struct Cli {
    #[arg(long, env = "HANOI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Pause between solution steps.
    #[arg(long, env = "HANOI_STEP_DELAY_MS", default_value_t = DEFAULT_STEP_DELAY_MS)]
    step_delay_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new game with N rings (1-10) on peg 1.
    Start {
        #[arg(value_parser = parse_rings)]
        rings: Disk,
    },
    /// Move the top ring of SRC onto DST (pegs 1-3).
    Move {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        src: u8,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        dst: u8,
    },
    /// Revert the last move.
    Undo,
    /// Start over with the current ring count.
    Restart,
    /// Print the current board.
    State,
    /// Print every step of the solution.
    Solve,
    /// Interactive game.
    Play,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(tracing::Level::WARN).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env().with_base_url(&cli.base_url);
    config.step_delay_ms = cli.step_delay_ms;
    let api = HttpGameApi::new(&config)?;

    match cli.command {
        Command::Start { rings } => {
            api.start_game(rings).await?;
            print_state(&api).await
        }
        Command::Move { src, dst } => {
            let outcome = api.attempt_move(usize::from(src - 1), usize::from(dst - 1)).await?;
            print_state(&api).await?;
            println!("{}", outcome.message());
            Ok(())
        }
        Command::Undo => {
            api.undo_last_move().await?;
            print_state(&api).await
        }
        Command::Restart => {
            let rings = current_rings(&api).await?;
            api.start_game(rings).await?;
            print_state(&api).await
        }
        Command::State => print_state(&api).await,
        Command::Solve => run_solve(&api, config.step_delay()).await,
        Command::Play => {
            let api: Arc<dyn GameApi> = Arc::new(api);
            let session = Arc::new(Session::new(api, Arc::new(TokioClock), config.step_delay()));
            play::run(session, config.frame_interval().max(Duration::from_millis(50))).await
        }
    }
}

/// Ring count argument, held to the same range the session accepts.
fn parse_rings(raw: &str) -> Result<Disk, String> {
    parse_disk_count(raw).map_err(|err| err.to_string())
}

async fn print_state(api: &HttpGameApi) -> Result<(), CliError> {
    let board = api.fetch_state().await?;
    println!("{}", render_board(&board, board.disk_count()));
    Ok(())
}

/// Ring count of the service's game, from the board itself.
async fn current_rings(api: &HttpGameApi) -> Result<Disk, CliError> {
    match api.fetch_state().await?.disk_count() {
        0 => Err(CliError::NoGame),
        n => Ok(n),
    }
}

async fn run_solve(api: &HttpGameApi, delay: Duration) -> Result<(), CliError> {
    let rings = current_rings(api).await?;
    let steps = api.request_solution().await?;
    for (i, step) in steps.iter().enumerate() {
        println!("step {}/{}\n{}\n", i + 1, steps.len(), render_board(step, rings));
        tokio::time::sleep(delay).await;
    }
    Ok(())
}
