//! Ring picking: ray against vertical cylinders.
//!
//! Rings are solid cylinders standing upright, so a pick ray can enter through
//! the curved side or through the top or bottom cap. The hit closest to the
//! ray origin wins.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Ray, Vec3};
use crate::scene::{RingMesh, Scene};

/// Result of a pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index into [`Scene::rings`].
    pub ring: usize,
    /// Distance along the ray.
    pub distance: f64,
    /// World-space point where the ray enters the ring.
    pub point: Vec3,
}

/// Nearest ring under `ray`, if any.
#[must_use]
pub fn pick_ring(ray: &Ray, scene: &Scene) -> Option<Hit> {
    scene
        .rings
        .iter()
        .enumerate()
        .filter_map(|(ring, mesh)| {
            intersect_ring(ray, mesh).map(|distance| Hit { ring, distance, point: ray.at(distance) })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Entry distance of `ray` into `mesh`, or `None` on a miss.
#[must_use]
pub fn intersect_ring(ray: &Ray, mesh: &RingMesh) -> Option<f64> {
    intersect_cylinder(ray, mesh.position, mesh.radius, mesh.height)
}

/// Entry distance of `ray` into the upright cylinder centered at `center`.
/// A ray starting inside reports distance `0`.
#[must_use]
pub fn intersect_cylinder(ray: &Ray, center: Vec3, radius: f64, height: f64) -> Option<f64> {
    let bottom = center.y - height / 2.0;
    let top = center.y + height / 2.0;
    let inside_radius = |p: Vec3| {
        let dx = p.x - center.x;
        let dz = p.z - center.z;
        dx * dx + dz * dz <= radius * radius
    };

    let o = ray.origin;
    let d = ray.direction;
    if inside_radius(o) && o.y >= bottom && o.y <= top {
        return Some(0.0);
    }

    let mut best: Option<f64> = None;
    let mut consider = |t: f64| {
        if t >= 0.0 && best.is_none_or(|b| t < b) {
            best = Some(t);
        }
    };

    // Curved side.
    let ox = o.x - center.x;
    let oz = o.z - center.z;
    let a = d.x * d.x + d.z * d.z;
    if a > f64::EPSILON {
        let b = 2.0 * (ox * d.x + oz * d.z);
        let c = ox * ox + oz * oz - radius * radius;
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sqrt = disc.sqrt();
            for t in [(-b - sqrt) / (2.0 * a), (-b + sqrt) / (2.0 * a)] {
                let y = o.y + d.y * t;
                if y >= bottom && y <= top {
                    consider(t);
                }
            }
        }
    }

    // Caps.
    if d.y.abs() > f64::EPSILON {
        for cap in [bottom, top] {
            let t = (cap - o.y) / d.y;
            if inside_radius(ray.at(t)) {
                consider(t);
            }
        }
    }

    best
}
