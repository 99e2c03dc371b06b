//! Tower of Hanoi game service.
//!
//! SYSTEM CONTEXT
//! ==============
//! One process hosts one game. The service owns the rules, the undo history
//! and the solver; clients only ever see boards the service produced.
//!
//! | Module | Role |
//! |--------|------|
//! | [`routes`] | Axum router and HTTP handlers |
//! | [`services`] | Game operations behind the handlers |
//! | [`state`] | Shared `AppState` |
//! | [`config`] | Environment-driven service settings |

pub mod config;
pub mod routes;
pub mod services;
pub mod state;
