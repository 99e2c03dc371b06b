//! Orbit camera, vector math and screen/world conversions.
//!
//! The camera orbits a fixed target on a sphere. Pointer drags feed angular
//! velocity; [`OrbitCamera::update`] applies a damped share of it each tick,
//! which gives the inertial feel of orbit controls.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Mul, Sub};

use crate::consts::{
    CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_POSITION, CAMERA_TARGET, DAMPING_FACTOR, MAX_DISTANCE, MIN_DISTANCE,
    POLAR_EPSILON, REST_EPSILON, ZOOM_STEP,
};

/// A point in screen space (CSS pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point or direction in world space. Y is up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 { self * (1.0 / len) } else { self }
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A half-line from `origin` along the unit vector `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection with the horizontal plane `y = height`, if in front of the origin.
    #[must_use]
    pub fn intersect_horizontal_plane(&self, height: f64) -> Option<Vec3> {
        if self.direction.y.abs() < f64::EPSILON {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then(|| self.at(t))
    }
}

/// Camera orientation basis derived from position and target.
#[derive(Debug, Clone, Copy)]
struct Basis {
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

/// Perspective camera orbiting a target, with damped rotation and clamped zoom.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Distance from the target.
    pub radius: f64,
    /// Azimuth around the Y axis, radians. `0` looks down -Z.
    pub theta: f64,
    /// Polar angle from +Y, radians.
    pub phi: f64,
    /// Pending azimuth change, consumed by [`OrbitCamera::update`].
    pub theta_velocity: f64,
    /// Pending polar change, consumed by [`OrbitCamera::update`].
    pub phi_velocity: f64,
    pub fov_deg: f64,
    /// Viewport width / height.
    pub aspect: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(Vec3::from_array(CAMERA_POSITION), Vec3::from_array(CAMERA_TARGET))
    }
}

impl OrbitCamera {
    /// Camera at `position` looking at `target`.
    #[must_use]
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let phi = if offset.length() > 0.0 {
            (offset.y / offset.length()).clamp(-1.0, 1.0).acos()
        } else {
            std::f64::consts::FRAC_PI_2
        };
        Self {
            target,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: phi.clamp(POLAR_EPSILON, std::f64::consts::PI - POLAR_EPSILON),
            theta_velocity: 0.0,
            phi_velocity: 0.0,
            fov_deg: CAMERA_FOV_DEG,
            aspect: 1.0,
        }
    }

    /// World-space eye position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target + Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius
    }

    fn basis(&self) -> Basis {
        let forward = (self.target - self.position()).normalize();
        let right = forward.cross(Vec3::new(0.0, 1.0, 0.0)).normalize();
        let up = right.cross(forward);
        Basis { forward, right, up }
    }

    fn tan_half_fov(&self) -> f64 {
        (self.fov_deg.to_radians() / 2.0).tan()
    }

    /// Queue an orbit from a pointer drag of `(dx, dy)` pixels over a viewport
    /// `viewport_height` pixels tall. A full-height drag turns a full circle.
    pub fn rotate(&mut self, dx: f64, dy: f64, viewport_height: f64) {
        if viewport_height <= 0.0 {
            return;
        }
        let turn = std::f64::consts::TAU / viewport_height;
        self.theta_velocity -= dx * turn;
        self.phi_velocity -= dy * turn;
    }

    /// Zoom in (`notches < 0`) or out (`notches > 0`), clamped to the distance limits.
    pub fn zoom(&mut self, notches: f64) {
        let scale = ZOOM_STEP.powf(-notches);
        self.radius = (self.radius * scale).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Apply one damped step of pending rotation. Returns whether the camera moved.
    pub fn update(&mut self) -> bool {
        if self.is_at_rest() {
            self.theta_velocity = 0.0;
            self.phi_velocity = 0.0;
            return false;
        }
        self.theta += self.theta_velocity * DAMPING_FACTOR;
        self.phi = (self.phi + self.phi_velocity * DAMPING_FACTOR)
            .clamp(POLAR_EPSILON, std::f64::consts::PI - POLAR_EPSILON);
        self.theta_velocity *= 1.0 - DAMPING_FACTOR;
        self.phi_velocity *= 1.0 - DAMPING_FACTOR;
        true
    }

    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.theta_velocity.abs() < REST_EPSILON && self.phi_velocity.abs() < REST_EPSILON
    }

    /// Ray from the eye through a screen point of a `width` x `height` viewport.
    #[must_use]
    pub fn screen_ray(&self, screen: Point, width: f64, height: f64) -> Ray {
        let ndc_x = if width > 0.0 { (screen.x / width) * 2.0 - 1.0 } else { 0.0 };
        let ndc_y = if height > 0.0 { -(screen.y / height) * 2.0 + 1.0 } else { 0.0 };
        let basis = self.basis();
        let tan_half = self.tan_half_fov();
        let direction = (basis.forward
            + basis.right * (ndc_x * tan_half * self.aspect)
            + basis.up * (ndc_y * tan_half))
            .normalize();
        Ray { origin: self.position(), direction }
    }

    /// Project a world point to screen space. Returns the point and its view
    /// depth, or `None` when it lies behind the near plane.
    #[must_use]
    pub fn project(&self, world: Vec3, width: f64, height: f64) -> Option<(Point, f64)> {
        let basis = self.basis();
        let d = world - self.position();
        let depth = d.dot(basis.forward);
        if depth < CAMERA_NEAR {
            return None;
        }
        let tan_half = self.tan_half_fov();
        let ndc_x = d.dot(basis.right) / (depth * tan_half * self.aspect);
        let ndc_y = d.dot(basis.up) / (depth * tan_half);
        let screen = Point::new((ndc_x + 1.0) * 0.5 * width, (1.0 - ndc_y) * 0.5 * height);
        Some((screen, depth))
    }

    /// View depth of a world point (distance along the viewing direction).
    #[must_use]
    pub fn depth_of(&self, world: Vec3) -> f64 {
        (world - self.position()).dot(self.basis().forward)
    }
}
