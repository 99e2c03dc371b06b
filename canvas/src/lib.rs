//! Board view for the Tower of Hanoi client.
//!
//! This crate owns the render context: a cached copy of the last confirmed
//! board, the 3D scene built from it, an orbit camera, ring picking and the
//! pointer state machine. Nothing in here talks to the network or draws:
//! input handlers return [`engine::Action`]s and [`render::project_scene`]
//! returns a [`render::Frame`] of screen polygons for the host to paint.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`]: cached board, scene, camera, gestures |
//! | [`scene`] | Pegs, rings, base and lights built from a board |
//! | [`camera`] | Orbit camera, vector math, screen/world conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Ray picking against ring meshes |
//! | [`render`] | Projection into flat, shaded polygons |
//! | [`consts`] | Layout, color and camera constants |

pub mod camera;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
