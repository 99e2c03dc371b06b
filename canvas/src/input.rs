//! Input model: mouse buttons, wheel deltas and the pointer state machine.
//!
//! `InputState` is the gesture tracked between pointer-down and pointer-up.
//! Only one gesture is active at a time: a ring drag and a camera orbit never
//! run together, and `Locked` swallows pointer-down while the host replays an
//! automatic solution.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use board::Disk;

use crate::camera::{Point, Vec3};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Internal state for the pointer state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The camera follows the pointer.
    Orbiting {
        /// Screen position of the previous pointer event.
        last_screen: Point,
    },
    /// A top ring follows the pointer on the drag plane.
    Dragging {
        /// Index into the scene's rings.
        ring: usize,
        disk: Disk,
        /// Peg the ring was lifted from.
        src: usize,
        /// Ring center before the drag, restored on snap-back.
        orig: Vec3,
    },
    /// Automatic solution in progress; pointer-down is ignored.
    Locked,
}

impl InputState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }
}
