//! Rendering: projects the 3D scene into flat polygons.
//!
//! Projection is split from drawing. [`project_scene`] is pure: it takes the
//! scene and camera and returns a [`Frame`] of screen-space polygons sorted
//! back to front (painter's algorithm). Hosts paint the polygons in order;
//! fills are CSS hex strings.
//!
//! Each cylinder becomes its silhouette (convex hull of the projected top and
//! bottom outlines) plus a top cap when the eye is above it. The base box
//! becomes the hull of its eight corners. Flat shading comes from the scene's
//! lights.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use board::Disk;

use crate::camera::{OrbitCamera, Point, Vec3};
use crate::consts::CYLINDER_SEGMENTS;
use crate::scene::{LightKind, Scene};

/// Depth bias that keeps a cap in front of its own silhouette.
const CAP_DEPTH_BIAS: f64 = 1e-3;

/// What a polygon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Shape {
    Base,
    Peg(usize),
    Ring(Disk),
}

/// One filled polygon in screen space.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DrawCommand {
    pub shape: Shape,
    pub points: Vec<Point>,
    /// CSS color.
    pub fill: String,
    /// View depth used for ordering; larger is farther.
    pub depth: f64,
}

/// A projected frame, ready to draw.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub background: String,
    /// Back to front.
    pub commands: Vec<DrawCommand>,
}

/// Project `scene` through `camera` into a `width` x `height` viewport.
#[must_use]
pub fn project_scene(scene: &Scene, camera: &OrbitCamera, width: f64, height: f64) -> Frame {
    let eye = camera.position();
    let mut commands = Vec::new();

    let half = scene.base.size * 0.5;
    let c = scene.base.position;
    let mut corners = Vec::with_capacity(8);
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                corners.push(c + Vec3::new(sx * half.x, sy * half.y, sz * half.z));
            }
        }
    }
    if let Some(points) = project_hull(&corners, camera, width, height) {
        let fill = shade(scene.base.color, light_factor(scene, Vec3::new(0.0, 1.0, 0.0)));
        commands.push(DrawCommand { shape: Shape::Base, points, fill, depth: camera.depth_of(c) });
    }

    for peg in &scene.pegs {
        push_cylinder(
            &mut commands,
            scene,
            camera,
            eye,
            Shape::Peg(peg.peg),
            (peg.position, peg.radius, peg.height, peg.color),
            (width, height),
        );
    }
    for ring in &scene.rings {
        push_cylinder(
            &mut commands,
            scene,
            camera,
            eye,
            Shape::Ring(ring.disk),
            (ring.position, ring.radius, ring.height, ring.color),
            (width, height),
        );
    }

    commands.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    Frame { width, height, background: css_color(scene.background), commands }
}

fn push_cylinder(
    commands: &mut Vec<DrawCommand>,
    scene: &Scene,
    camera: &OrbitCamera,
    eye: Vec3,
    shape: Shape,
    (center, radius, height, color): (Vec3, f64, f64, u32),
    (width, viewport_h): (f64, f64),
) {
    let top_y = center.y + height / 2.0;
    let bottom_y = center.y - height / 2.0;
    let top = circle(center, radius, top_y);
    let bottom = circle(center, radius, bottom_y);

    let mut outline = top.clone();
    outline.extend(bottom);
    let Some(points) = project_hull(&outline, camera, width, viewport_h) else {
        return;
    };
    let toward_eye = Vec3::new(eye.x - center.x, 0.0, eye.z - center.z).normalize();
    let depth = camera.depth_of(center);
    commands.push(DrawCommand { shape, points, fill: shade(color, light_factor(scene, toward_eye)), depth });

    if eye.y > top_y {
        if let Some(cap) = project_all(&top, camera, width, viewport_h) {
            let fill = shade(color, light_factor(scene, Vec3::new(0.0, 1.0, 0.0)));
            commands.push(DrawCommand { shape, points: cap, fill, depth: depth - CAP_DEPTH_BIAS });
        }
    }
}

fn circle(center: Vec3, radius: f64, y: f64) -> Vec<Vec3> {
    (0..CYLINDER_SEGMENTS)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = std::f64::consts::TAU * i as f64 / CYLINDER_SEGMENTS as f64;
            let (sin, cos) = angle.sin_cos();
            Vec3::new(center.x + radius * cos, y, center.z + radius * sin)
        })
        .collect()
}

/// Project every point; `None` when any of them is behind the camera.
fn project_all(points: &[Vec3], camera: &OrbitCamera, width: f64, height: f64) -> Option<Vec<Point>> {
    points
        .iter()
        .map(|&p| camera.project(p, width, height).map(|(screen, _)| screen))
        .collect()
}

fn project_hull(points: &[Vec3], camera: &OrbitCamera, width: f64, height: f64) -> Option<Vec<Point>> {
    project_all(points, camera, width, height).map(convex_hull)
}

/// Convex hull in counter-clockwise order (monotone chain).
#[must_use]
pub fn convex_hull(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let mut lower: Vec<Point> = Vec::new();
    for &p in &points {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Point> = Vec::new();
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Brightness of a surface with `normal` under the scene's lights, capped at 1.
fn light_factor(scene: &Scene, normal: Vec3) -> f64 {
    let total: f64 = scene
        .lights
        .iter()
        .map(|light| match light.kind {
            LightKind::Ambient => light.intensity,
            LightKind::Directional { position } => light.intensity * normal.dot(position.normalize()).max(0.0),
        })
        .sum();
    total.min(1.0)
}

/// CSS color for `0xRRGGBB` scaled by `factor`.
#[must_use]
pub fn shade(color: u32, factor: f64) -> String {
    let factor = factor.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let c = f64::from((color >> shift) & 0xff) * factor;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let c = c.round() as u32;
        c.min(0xff)
    };
    format!("#{:02x}{:02x}{:02x}", channel(16), channel(8), channel(0))
}

#[must_use]
pub fn css_color(color: u32) -> String {
    format!("#{:06x}", color & 0x00ff_ffff)
}
