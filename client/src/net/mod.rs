//! Remote sync layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the [`GameApi`] seam and its reqwest implementation, `error`
//! classifies what can go wrong on the way to the service and back.

pub mod api;
pub mod error;

pub use api::{GameApi, HttpGameApi};
pub use error::SyncError;
