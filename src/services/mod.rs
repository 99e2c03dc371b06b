//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the game logic so route handlers can stay focused on
//! query parsing and status mapping.

pub mod game;
