//! Shared numeric constants for the canvas crate.
//!
//! World units are arbitrary; the board is about 100 units wide.

// ── Board layout ────────────────────────────────────────────────

/// X coordinate of each peg, left to right.
pub const PEG_POSITIONS: [f64; 3] = [-40.0, 0.0, 40.0];

/// Y of the floor the base box rests on.
pub const BOARD_Y: f64 = 0.0;

/// Base box size (x, y, z).
pub const BASE_SIZE: [f64; 3] = [100.0, 4.0, 30.0];

/// Top surface of the base; rings and pegs start here.
pub const BASE_TOP: f64 = BOARD_Y + BASE_SIZE[1];

pub const PEG_RADIUS: f64 = 4.0;

/// Extra peg length above a full stack.
pub const PEG_HEADROOM: f64 = 2.0 * RING_HEIGHT;

pub const RING_HEIGHT: f64 = 10.0;

/// Gap kept between the widest ring and the midpoint between two pegs.
pub const RING_MARGIN: f64 = 4.0;

/// Radius of the largest ring.
pub const MAX_RING_RADIUS: f64 = (PEG_POSITIONS[1] - PEG_POSITIONS[0]) / 2.0 - RING_MARGIN;

/// Radius of the smallest ring, as a fraction of the largest.
pub const MIN_RING_RATIO: f64 = 0.4;

/// Radius of the smallest ring.
pub const MIN_RING_RADIUS: f64 = MAX_RING_RADIUS * MIN_RING_RATIO;

// ── Colors (0xRRGGBB) ───────────────────────────────────────────

pub const BACKGROUND_COLOR: u32 = 0x0022_2222;
pub const BASE_COLOR: u32 = 0x008d_6e63;
pub const PEG_COLOR: u32 = 0x0019_76d2;

/// Ring palette indexed by `(disk - 1) % len`.
pub const RING_PALETTE: [u32; 10] = [
    0x00ff_7043,
    0x0066_bb6a,
    0x0029_b6f6,
    0x00ff_ca28,
    0x00ab_47bc,
    0x0026_a69a,
    0x008d_6e63,
    0x0078_9262,
    0x00ba_68c8,
    0x00d4_e157,
];

pub const AMBIENT_INTENSITY: f64 = 0.7;
pub const DIRECTIONAL_INTENSITY: f64 = 0.7;
pub const DIRECTIONAL_POSITION: [f64; 3] = [0.0, 100.0, 100.0];

// ── Camera ──────────────────────────────────────────────────────

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEG: f64 = 45.0;
pub const CAMERA_NEAR: f64 = 1.0;
pub const CAMERA_POSITION: [f64; 3] = [0.0, 60.0, 180.0];
pub const CAMERA_TARGET: [f64; 3] = [0.0, 40.0, 0.0];

/// Fraction of the remaining orbit velocity applied per tick.
pub const DAMPING_FACTOR: f64 = 0.1;

/// Orbit distance limits.
pub const MIN_DISTANCE: f64 = 80.0;
pub const MAX_DISTANCE: f64 = 300.0;

/// Distance multiplier per wheel notch.
pub const ZOOM_STEP: f64 = 0.95;

/// Keeps the orbit camera off the poles.
pub const POLAR_EPSILON: f64 = 1e-3;

/// Orbit velocity below which the camera is considered at rest.
pub const REST_EPSILON: f64 = 1e-5;

// ── Rendering ───────────────────────────────────────────────────

/// Points sampled around each cylinder outline.
pub const CYLINDER_SEGMENTS: usize = 32;
