//! Render context and pointer interaction controller.
//!
//! DESIGN
//! ======
//! `EngineCore` holds everything the board view needs: the cached board, the
//! scene built from it, the orbit camera and the gesture state. It has no
//! platform dependency; the client session shares it with the render loop.
//!
//! Input handlers never talk to the network. They return [`Action`]s; a
//! completed drag onto another peg becomes [`Action::MoveRequested`] and the
//! host decides what to do with it. The cached board is only replaced by
//! [`EngineCore::load_board`], which is fed server-confirmed state.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use board::{Board, Disk};

use crate::camera::{OrbitCamera, Point};
use crate::hit::pick_ring;
use crate::input::{Button, InputState, WheelDelta};
use crate::render::{self, Frame};
use crate::scene::{Scene, SceneError, drag_plane_y, nearest_peg};

const CURSOR_DEFAULT: &str = "default";
const CURSOR_GRAB: &str = "grab";
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A ring was dropped on a different peg; ask the service to move it.
    MoveRequested { src: usize, dst: usize },
    /// A ring was dropped back on its own peg and restored.
    SnappedBack { disk: Disk },
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
#[derive(Debug, Clone)]
pub struct EngineCore {
    /// Last server-confirmed board.
    pub board: Board,
    pub disks: Disk,
    pub scene: Scene,
    pub camera: OrbitCamera,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            disks: 0,
            scene: Scene::new(),
            camera: OrbitCamera::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the cached board and rebuild the scene from it.
    ///
    /// An active drag is dropped; a lock is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidBoard`] when `board` breaks the board
    /// invariants for `disks`; cache and scene keep their previous state.
    pub fn load_board(&mut self, board: Board, disks: Disk) -> Result<(), SceneError> {
        self.scene.build(&board, disks)?;
        self.board = board;
        self.disks = disks;
        if !self.input.is_locked() {
            self.input = InputState::Idle;
        }
        Ok(())
    }

    /// Forget the board and remove every ring.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.board = Board::empty();
        self.disks = 0;
        if !self.input.is_locked() {
            self.input = InputState::Idle;
        }
    }

    /// Ignore pointer-down until [`EngineCore::unlock`]. A drag in progress is
    /// cancelled and its ring restored.
    pub fn lock(&mut self) {
        self.cancel_drag();
        self.input = InputState::Locked;
    }

    pub fn unlock(&mut self) {
        if self.input.is_locked() {
            self.input = InputState::Idle;
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.input.is_locked()
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css.max(0.0);
        self.viewport_height = height_css.max(0.0);
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        if self.viewport_height > 0.0 {
            self.camera.aspect = self.viewport_width / self.viewport_height;
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !matches!(self.input, InputState::Idle) || button != Button::Primary {
            return Vec::new();
        }

        let ray = self.camera.screen_ray(screen_pt, self.viewport_width, self.viewport_height);
        let picked = pick_ring(&ray, &self.scene).and_then(|hit| self.scene.ring(hit.ring).map(|r| (hit.ring, r)));

        match picked {
            Some((ring, mesh)) if self.board.is_top(mesh.peg, mesh.index) => {
                self.input = InputState::Dragging { ring, disk: mesh.disk, src: mesh.peg, orig: mesh.position };
                vec![Action::SetCursor(CURSOR_GRABBING.into())]
            }
            _ => {
                self.input = InputState::Orbiting { last_screen: screen_pt };
                Vec::new()
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.input {
            InputState::Orbiting { last_screen } => {
                self.camera.rotate(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y, self.viewport_height);
                self.input = InputState::Orbiting { last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::Dragging { ring, .. } => {
                let ray = self.camera.screen_ray(screen_pt, self.viewport_width, self.viewport_height);
                let Some(target) = ray.intersect_horizontal_plane(drag_plane_y(self.disks)) else {
                    return Vec::new();
                };
                let Some(mesh) = self.scene.ring_mut(ring) else {
                    return Vec::new();
                };
                mesh.position.x = target.x;
                mesh.position.z = target.z;
                vec![Action::RenderNeeded]
            }
            InputState::Idle => {
                let ray = self.camera.screen_ray(screen_pt, self.viewport_width, self.viewport_height);
                let over_top = pick_ring(&ray, &self.scene)
                    .and_then(|hit| self.scene.ring(hit.ring))
                    .is_some_and(|mesh| self.board.is_top(mesh.peg, mesh.index));
                let cursor = if over_top { CURSOR_GRAB } else { CURSOR_DEFAULT };
                vec![Action::SetCursor(cursor.into())]
            }
            InputState::Locked => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Dragging { ring, disk, src, orig } => {
                let Some(mesh) = self.scene.ring_mut(ring) else {
                    return vec![Action::SetCursor(CURSOR_DEFAULT.into())];
                };
                let dst = nearest_peg(mesh.position.x);
                if dst == src {
                    mesh.position = orig;
                    vec![Action::SnappedBack { disk }, Action::SetCursor(CURSOR_DEFAULT.into()), Action::RenderNeeded]
                } else {
                    vec![Action::MoveRequested { src, dst }, Action::SetCursor(CURSOR_DEFAULT.into())]
                }
            }
            InputState::Orbiting { .. } | InputState::Idle => Vec::new(),
            InputState::Locked => {
                self.input = InputState::Locked;
                Vec::new()
            }
        }
    }

    /// Zoom the camera. Allowed in every state.
    pub fn on_wheel(&mut self, _screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        if delta.dy == 0.0 {
            return Vec::new();
        }
        self.camera.zoom(delta.dy.signum());
        vec![Action::RenderNeeded]
    }

    // --- Animation ---

    /// Advance camera damping by one tick. Returns whether anything moved.
    pub fn tick(&mut self) -> bool {
        self.camera.update()
    }

    /// Project the current scene for the current viewport.
    #[must_use]
    pub fn frame(&self) -> Frame {
        render::project_scene(&self.scene, &self.camera, self.viewport_width, self.viewport_height)
    }

    fn cancel_drag(&mut self) {
        if let InputState::Dragging { ring, orig, .. } = self.input {
            if let Some(mesh) = self.scene.ring_mut(ring) {
                mesh.position = orig;
            }
            self.input = InputState::Idle;
        }
    }
}
