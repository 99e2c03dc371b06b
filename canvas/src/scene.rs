//! Scene builder: turns a board snapshot into pegs, rings, base and lights.
//!
//! Every [`Scene::build`] discards all pegs and rings and creates them again
//! from the snapshot. Boards are small, so there is no diffing. Snapshots that
//! break the board invariants are refused and the previous scene is kept.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use board::{Board, BoardError, Disk};

use crate::camera::Vec3;
use crate::consts::{
    AMBIENT_INTENSITY, BACKGROUND_COLOR, BASE_COLOR, BASE_SIZE, BASE_TOP, BOARD_Y, DIRECTIONAL_INTENSITY,
    DIRECTIONAL_POSITION, MAX_RING_RADIUS, MIN_RING_RADIUS, PEG_COLOR, PEG_HEADROOM, PEG_POSITIONS, PEG_RADIUS,
    RING_HEIGHT, RING_PALETTE,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("refusing to draw board: {0}")]
    InvalidBoard(#[from] BoardError),
}

/// A rendered disk. `position` is the center of the cylinder.
#[derive(Debug, Clone, PartialEq)]
pub struct RingMesh {
    pub disk: Disk,
    /// Peg the ring sits on.
    pub peg: usize,
    /// Stack position on its peg, `0` at the bottom.
    pub index: usize,
    pub radius: f64,
    pub height: f64,
    pub color: u32,
    pub position: Vec3,
}

/// A rendered peg. `position` is the center of the column.
#[derive(Debug, Clone, PartialEq)]
pub struct PegMesh {
    pub peg: usize,
    pub radius: f64,
    pub height: f64,
    pub color: u32,
    pub position: Vec3,
}

/// The box the pegs stand on.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMesh {
    pub size: Vec3,
    pub color: u32,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Directional light shining from `position` towards the origin.
    Directional { position: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: u32,
    pub intensity: f64,
}

/// Visual tree of the board.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: u32,
    pub base: BaseMesh,
    pub lights: Vec<Light>,
    pub pegs: Vec<PegMesh>,
    pub rings: Vec<RingMesh>,
    disks: Disk,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Static scene: base, lights and empty pegs sized for zero disks.
    #[must_use]
    pub fn new() -> Self {
        let base = BaseMesh {
            size: Vec3::from_array(BASE_SIZE),
            color: BASE_COLOR,
            position: Vec3::new(0.0, BOARD_Y + BASE_SIZE[1] / 2.0, 0.0),
        };
        let lights = vec![
            Light { kind: LightKind::Ambient, color: 0x00ff_ffff, intensity: AMBIENT_INTENSITY },
            Light {
                kind: LightKind::Directional { position: Vec3::from_array(DIRECTIONAL_POSITION) },
                color: 0x00ff_ffff,
                intensity: DIRECTIONAL_INTENSITY,
            },
        ];
        Self { background: BACKGROUND_COLOR, base, lights, pegs: build_pegs(0), rings: Vec::new(), disks: 0 }
    }

    /// Disk count the current pegs were sized for.
    #[must_use]
    pub fn disks(&self) -> Disk {
        self.disks
    }

    /// Rebuild pegs and rings for `board`, a game of `disks` disks.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidBoard`] when `board` breaks the invariants
    /// or holds a different number of disks; the scene is left unchanged.
    pub fn build(&mut self, board: &Board, disks: Disk) -> Result<(), SceneError> {
        board.validate_for(disks)?;

        self.clear();
        self.disks = disks;
        self.pegs = build_pegs(disks);
        for (peg, stack) in board.pegs().iter().enumerate() {
            for (index, &disk) in stack.iter().enumerate() {
                self.rings.push(RingMesh {
                    disk,
                    peg,
                    index,
                    radius: ring_radius(disk, disks),
                    height: RING_HEIGHT,
                    color: ring_color(disk),
                    position: ring_rest_position(peg, index),
                });
            }
        }
        Ok(())
    }

    /// Remove every ring and peg, then restore empty pegs.
    pub fn clear(&mut self) {
        self.rings.clear();
        self.pegs.clear();
        self.disks = 0;
        self.pegs = build_pegs(0);
    }

    #[must_use]
    pub fn ring(&self, i: usize) -> Option<&RingMesh> {
        self.rings.get(i)
    }

    pub fn ring_mut(&mut self, i: usize) -> Option<&mut RingMesh> {
        self.rings.get_mut(i)
    }

    /// Index of the ring showing `disk`.
    #[must_use]
    pub fn ring_index_of(&self, disk: Disk) -> Option<usize> {
        self.rings.iter().position(|r| r.disk == disk)
    }
}

fn build_pegs(disks: Disk) -> Vec<PegMesh> {
    let height = peg_height(disks);
    PEG_POSITIONS
        .iter()
        .enumerate()
        .map(|(peg, &x)| PegMesh {
            peg,
            radius: PEG_RADIUS,
            height,
            color: PEG_COLOR,
            position: Vec3::new(x, BASE_TOP + height / 2.0, 0.0),
        })
        .collect()
}

/// Peg length for a game of `disks` disks: a full stack plus headroom.
#[must_use]
pub fn peg_height(disks: Disk) -> f64 {
    f64::from(disks) * RING_HEIGHT + PEG_HEADROOM
}

/// Ring radius, linear in disk id between the smallest and largest radius.
#[must_use]
pub fn ring_radius(disk: Disk, disks: Disk) -> f64 {
    let span = f64::from(disks.saturating_sub(1).max(1));
    let t = (f64::from(disk.saturating_sub(1)) / span).clamp(0.0, 1.0);
    MIN_RING_RADIUS + t * (MAX_RING_RADIUS - MIN_RING_RADIUS)
}

#[must_use]
pub fn ring_color(disk: Disk) -> u32 {
    RING_PALETTE[disk.saturating_sub(1) as usize % RING_PALETTE.len()]
}

/// Center of a ring resting at stack `index` of `peg`.
#[must_use]
pub fn ring_rest_position(peg: usize, index: usize) -> Vec3 {
    let x = PEG_POSITIONS.get(peg).copied().unwrap_or(PEG_POSITIONS[0]);
    let stack = f64::from(u32::try_from(index).unwrap_or(u32::MAX));
    Vec3::new(x, BASE_TOP + RING_HEIGHT / 2.0 + stack * RING_HEIGHT, 0.0)
}

/// Height of the plane dragged rings travel on: half way up a full stack.
#[must_use]
pub fn drag_plane_y(disks: Disk) -> f64 {
    BASE_TOP + RING_HEIGHT / 2.0 + f64::from(disks.saturating_sub(1)) * RING_HEIGHT / 2.0
}

/// Peg whose x coordinate is closest to `x`. Ties go to the lower index.
#[must_use]
pub fn nearest_peg(x: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &peg_x) in PEG_POSITIONS.iter().enumerate() {
        let d = (x - peg_x).abs();
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}
