//! Continuous render loop.
//!
//! Each tick advances camera damping, projects the current scene and hands
//! the result to a [`Surface`]. The loop only reads the render context; it
//! never talks to the game service, so it runs alongside any session flow.
//! The render context lock is released before the surface draws.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use board::{Board, Disk};
use canvas::engine::EngineCore;
use canvas::render::Frame;
use tokio::task::JoinHandle;
use tracing::info;

use crate::clock::Clock;
use crate::session::Session;

/// What one tick presents: the projected scene and the board it shows.
#[derive(Debug, Clone)]
pub struct View {
    pub frame: Frame,
    /// Last server-confirmed board.
    pub board: Board,
    /// Disk count the scene was built for, `0` without a game.
    pub disks: Disk,
}

/// Where views end up: a canvas, a terminal, a test recorder.
pub trait Surface: Send + 'static {
    fn present(&mut self, view: &View);
}

/// Spawn the redraw loop for `session`. It runs until the handle is aborted.
#[must_use]
pub fn spawn_render_loop<S: Surface>(
    session: &Session,
    mut surface: S,
    clock: Arc<dyn Clock>,
    interval: Duration,
) -> JoinHandle<()> {
    let core = session.view();
    info!(interval_ms = interval.as_millis(), "render loop started");
    tokio::spawn(async move {
        loop {
            let view = next_view(&core);
            surface.present(&view);
            clock.sleep(interval).await;
        }
    })
}

fn next_view(core: &Mutex<EngineCore>) -> View {
    let mut core = core.lock().unwrap_or_else(PoisonError::into_inner);
    core.tick();
    View { frame: core.frame(), board: core.board.clone(), disks: core.disks }
}
