//! Client session: one game, one status line, one render context.
//!
//! DESIGN
//! ======
//! A `Session` owns everything a front-end needs between "start" and "quit":
//! the configured disk count, the status line, the click-to-select peg and
//! the render context ([`EngineCore`]). It is shared as `Arc<Session>`; every
//! method takes `&self`.
//!
//! CONCURRENCY
//! ===========
//! Mutating flows (start, restart, move, undo, solve, quit) take the
//! in-flight guard with `try_lock`. A second flow while one is running fails
//! with [`SessionError::Busy`] instead of queueing, so the board cache can
//! never interleave two server conversations. Every flow re-fetches state
//! before it releases the guard.
//!
//! The render context sits behind a `std::sync::Mutex` that is only taken
//! for short synchronous sections, never across an `.await`; the render loop
//! shares it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use board::game::DEFAULT_MAX_RINGS;
use board::{Board, Disk, MoveOutcome, PEG_COUNT};
use canvas::camera::Point;
use canvas::engine::{Action, EngineCore};
use canvas::input::{Button, WheelDelta};
use canvas::render::Frame;
use canvas::scene::SceneError;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::net::{GameApi, SyncError};

pub const STATUS_RESTARTED: &str = "Game restarted.";
pub const STATUS_UNDONE: &str = "Last move undone.";
pub const STATUS_SOLVED: &str = "Solved!";
pub const STATUS_QUIT: &str = "Game quit.";
pub const STATUS_SELECTION_CLEARED: &str = "Selection cleared";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Please enter a valid number of rings (1–10).")]
    InvalidDiskCount(String),

    #[error("You need to start a game first!")]
    NotStarted,

    #[error("Please wait for the current action to finish.")]
    Busy,

    #[error("There is no peg {}.", .0 + 1)]
    InvalidPeg(usize),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl SessionError {
    /// Whether trying the same action again may help.
    #[must_use]
    pub fn retryable(&self) -> bool {
        match self {
            Self::Busy => true,
            Self::Sync(err) => err.retryable(),
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    /// `0` until a game is started.
    disks: Disk,
    status: String,
    selected: Option<usize>,
}

pub struct Session {
    api: Arc<dyn GameApi>,
    clock: Arc<dyn Clock>,
    step_delay: Duration,
    view: Arc<Mutex<EngineCore>>,
    state: Mutex<SessionState>,
    in_flight: tokio::sync::Mutex<()>,
}

/// Unlocks the render context when dropped, whichever way the flow exits.
struct InteractionLock {
    view: Arc<Mutex<EngineCore>>,
}

impl InteractionLock {
    fn engage(view: &Arc<Mutex<EngineCore>>) -> Self {
        lock_view(view).lock();
        Self { view: Arc::clone(view) }
    }
}

impl Drop for InteractionLock {
    fn drop(&mut self) {
        lock_view(&self.view).unlock();
    }
}

fn lock_view(view: &Mutex<EngineCore>) -> MutexGuard<'_, EngineCore> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Parse a disk count typed by the user.
///
/// # Errors
///
/// Returns [`SessionError::InvalidDiskCount`] for anything that is not an
/// integer in `1..=10`.
pub fn parse_disk_count(input: &str) -> Result<Disk, SessionError> {
    let trimmed = input.trim();
    match trimmed.parse::<Disk>() {
        Ok(n) if (1..=DEFAULT_MAX_RINGS).contains(&n) => Ok(n),
        _ => Err(SessionError::InvalidDiskCount(trimmed.to_owned())),
    }
}

impl Session {
    #[must_use]
    pub fn new(api: Arc<dyn GameApi>, clock: Arc<dyn Clock>, step_delay: Duration) -> Self {
        Self {
            api,
            clock,
            step_delay,
            view: Arc::new(Mutex::new(EngineCore::new())),
            state: Mutex::new(SessionState::default()),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_status(&self, status: impl Into<String>) {
        self.state().status = status.into();
    }

    /// Record `err` on the status line and hand it back.
    fn fail(&self, err: impl Into<SessionError>) -> SessionError {
        let err = err.into();
        warn!(error = %err, "session action failed");
        self.set_status(err.to_string());
        err
    }

    fn guard(&self) -> Result<tokio::sync::MutexGuard<'_, ()>, SessionError> {
        self.in_flight.try_lock().map_err(|_| SessionError::Busy)
    }

    // --- Queries ---

    /// Disk count of the current game, `0` when none is running.
    #[must_use]
    pub fn disks(&self) -> Disk {
        self.state().disks
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.disks() > 0
    }

    #[must_use]
    pub fn status(&self) -> String {
        self.state().status.clone()
    }

    #[must_use]
    pub fn selected_peg(&self) -> Option<usize> {
        self.state().selected
    }

    /// Last server-confirmed board.
    #[must_use]
    pub fn board(&self) -> Board {
        lock_view(&self.view).board.clone()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        lock_view(&self.view).is_locked()
    }

    /// Shared handle to the render context.
    #[must_use]
    pub fn view(&self) -> Arc<Mutex<EngineCore>> {
        Arc::clone(&self.view)
    }

    // --- Game flows ---

    /// Start a game from user input. The count is checked before any request.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidDiskCount`], [`SessionError::Busy`], or the
    /// sync/scene failure that stopped the flow.
    pub async fn start_game(&self, input: &str) -> Result<(), SessionError> {
        let disks = parse_disk_count(input).map_err(|e| self.fail(e))?;
        let _flight = self.guard().map_err(|e| self.fail(e))?;

        self.api.start_game(disks).await.map_err(|e| self.fail(e))?;
        {
            let mut state = self.state();
            state.disks = disks;
            state.selected = None;
            state.status.clear();
        }
        info!(disks, "game started");
        self.refresh().await
    }

    /// Reset the current game to all disks on the first peg.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotStarted`], [`SessionError::Busy`], or the
    /// sync/scene failure that stopped the flow.
    pub async fn restart(&self) -> Result<(), SessionError> {
        let disks = self.require_game()?;
        let _flight = self.guard().map_err(|e| self.fail(e))?;

        self.api.start_game(disks).await.map_err(|e| self.fail(e))?;
        {
            let mut state = self.state();
            state.selected = None;
            state.status = STATUS_RESTARTED.to_owned();
        }
        info!(disks, "game restarted");
        self.refresh().await
    }

    /// Ask the service to move the top disk of `src` onto `dst`, then re-sync
    /// whatever the answer was.
    ///
    /// # Errors
    ///
    /// An illegal move is not an error; it comes back as
    /// [`MoveOutcome::Rejected`]. Errors are [`SessionError::NotStarted`],
    /// [`SessionError::InvalidPeg`], [`SessionError::Busy`] or a sync/scene
    /// failure.
    pub async fn attempt_move(&self, src: usize, dst: usize) -> Result<MoveOutcome, SessionError> {
        self.require_game()?;
        for peg in [src, dst] {
            if peg >= PEG_COUNT {
                return Err(self.fail(SessionError::InvalidPeg(peg)));
            }
        }
        let _flight = self.guard().map_err(|e| self.fail(e))?;

        let outcome = self.api.attempt_move(src, dst).await.map_err(|e| self.fail(e))?;
        info!(src, dst, accepted = outcome.is_ok(), "move attempted");
        self.set_status(outcome.message());
        self.refresh().await?;
        Ok(outcome)
    }

    /// Revert the last accepted move. The service decides whether there was one.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotStarted`], [`SessionError::Busy`], or a sync/scene
    /// failure.
    pub async fn undo(&self) -> Result<(), SessionError> {
        self.require_game()?;
        let _flight = self.guard().map_err(|e| self.fail(e))?;

        self.api.undo_last_move().await.map_err(|e| self.fail(e))?;
        self.set_status(STATUS_UNDONE);
        self.refresh().await
    }

    /// Click-to-select: the first click picks a source peg, a second click on
    /// the same peg clears it, a click on another peg moves.
    ///
    /// # Errors
    ///
    /// Same as [`Session::attempt_move`]. [`SessionError::Busy`] while another
    /// flow runs or input is locked; the selection is left untouched.
    pub async fn select_peg(&self, peg: usize) -> Result<Option<MoveOutcome>, SessionError> {
        self.require_game()?;
        if peg >= PEG_COUNT {
            return Err(self.fail(SessionError::InvalidPeg(peg)));
        }
        if self.is_locked() {
            return Err(self.fail(SessionError::Busy));
        }
        // Released at once; the move below takes the guard itself.
        drop(self.guard().map_err(|e| self.fail(e))?);

        let src = {
            let mut state = self.state();
            match state.selected {
                None => {
                    state.selected = Some(peg);
                    state.status = format!("Selected source peg {}", peg + 1);
                    return Ok(None);
                }
                Some(src) if src == peg => {
                    state.selected = None;
                    state.status = STATUS_SELECTION_CLEARED.to_owned();
                    return Ok(None);
                }
                Some(src) => {
                    state.selected = None;
                    src
                }
            }
        };
        self.attempt_move(src, peg).await.map(Some)
    }

    /// Reset, then replay the service's solution one snapshot per step.
    ///
    /// Pointer input is locked for the whole flow. Every exit unlocks it and
    /// clears the peg selection.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotStarted`], [`SessionError::Busy`], or the
    /// sync/scene failure that stopped playback.
    pub async fn auto_solve(&self) -> Result<(), SessionError> {
        let disks = self.require_game()?;
        let _flight = self.guard().map_err(|e| self.fail(e))?;
        let _locked = InteractionLock::engage(&self.view);
        self.state().selected = None;

        let played = self.play_solution(disks).await;
        self.state().selected = None;
        played?;
        self.set_status(STATUS_SOLVED);
        Ok(())
    }

    /// Reset, pause, then show every solution step with a pause after each.
    async fn play_solution(&self, disks: Disk) -> Result<(), SessionError> {
        self.api.start_game(disks).await.map_err(|e| self.fail(e))?;
        self.refresh().await?;
        self.clock.sleep(self.step_delay).await;

        let steps = self.api.request_solution().await.map_err(|e| self.fail(e))?;
        info!(disks, steps = steps.len(), "playing solution");
        for step in steps {
            self.show(step, disks)?;
            self.clock.sleep(self.step_delay).await;
        }

        self.refresh().await
    }

    /// Tear the game down locally. The service keeps its state.
    ///
    /// # Errors
    ///
    /// [`SessionError::Busy`] while another flow runs.
    pub fn quit(&self) -> Result<(), SessionError> {
        let _flight = self.guard().map_err(|e| self.fail(e))?;
        lock_view(&self.view).clear();
        {
            let mut state = self.state();
            state.disks = 0;
            state.selected = None;
            state.status = STATUS_QUIT.to_owned();
        }
        info!("game quit");
        Ok(())
    }

    // --- Pointer input ---

    pub fn pointer_down(&self, screen_pt: Point, button: Button) -> Vec<Action> {
        lock_view(&self.view).on_pointer_down(screen_pt, button)
    }

    pub fn pointer_move(&self, screen_pt: Point) -> Vec<Action> {
        lock_view(&self.view).on_pointer_move(screen_pt)
    }

    /// Finish a gesture. A drop onto another peg is sent to the service.
    ///
    /// # Errors
    ///
    /// Whatever [`Session::attempt_move`] returns for the requested move.
    pub async fn pointer_up(&self, screen_pt: Point, button: Button) -> Result<Vec<Action>, SessionError> {
        let actions = lock_view(&self.view).on_pointer_up(screen_pt, button);
        let requested = actions.iter().find_map(|a| match a {
            Action::MoveRequested { src, dst } => Some((*src, *dst)),
            _ => None,
        });
        if let Some((src, dst)) = requested {
            if let Err(err) = self.attempt_move(src, dst).await {
                self.redraw_cached();
                return Err(err);
            }
        }
        Ok(actions)
    }

    pub fn wheel(&self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        lock_view(&self.view).on_wheel(screen_pt, delta)
    }

    pub fn set_viewport(&self, width_css: f64, height_css: f64, dpr: f64) {
        lock_view(&self.view).set_viewport(width_css, height_css, dpr);
    }

    /// Advance camera damping and project the scene.
    pub fn tick(&self) -> Frame {
        let mut view = lock_view(&self.view);
        view.tick();
        view.frame()
    }

    // --- Internals ---

    fn require_game(&self) -> Result<Disk, SessionError> {
        match self.disks() {
            0 => Err(self.fail(SessionError::NotStarted)),
            n => Ok(n),
        }
    }

    /// Fetch the authoritative board and rebuild the scene from it.
    async fn refresh(&self) -> Result<(), SessionError> {
        let board = self.api.fetch_state().await.map_err(|e| self.fail(e))?;
        let disks = self.disks();
        self.show(board, disks)
    }

    /// Put every ring back where the cached board says it is.
    fn redraw_cached(&self) {
        let mut view = lock_view(&self.view);
        let (board, disks) = (view.board.clone(), view.disks);
        if let Err(err) = view.load_board(board, disks) {
            warn!(error = %err, "cached board no longer renders");
        }
    }

    fn show(&self, board: Board, disks: Disk) -> Result<(), SessionError> {
        lock_view(&self.view).load_board(board, disks).map_err(|e| self.fail(e))
    }
}
