//! Tower of Hanoi client: session, sync layer and render loop.
//!
//! SYSTEM CONTEXT
//! ==============
//! The game service owns the rules, the history and the solver. This crate
//! drives it over HTTP and keeps a [`canvas::engine::EngineCore`] in step with
//! whatever the service confirms. Front-ends talk to a [`Session`] and never
//! to the service directly; they draw whatever the render loop presents.
//!
//! | Module | Role |
//! |--------|------|
//! | [`net`] | [`net::GameApi`] trait, reqwest implementation, [`net::SyncError`] |
//! | [`session`] | Game flows, status line, peg selection, in-flight guard |
//! | [`clock`] | Timed-step scheduler with a virtual clock for tests |
//! | [`animation`] | Continuous render loop presenting frames to a [`animation::Surface`] |
//! | [`config`] | Environment-driven client settings |

pub mod animation;
pub mod clock;
pub mod config;
pub mod net;
pub mod session;

#[cfg(test)]
mod test_support;

pub use clock::{Clock, ManualClock, TokioClock};
pub use config::ClientConfig;
pub use net::{GameApi, HttpGameApi, SyncError};
pub use session::{Session, SessionError};
