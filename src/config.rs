//! Service configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use board::Disk;
use board::game::DEFAULT_MAX_RINGS;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    /// Directory served for every path the API does not claim.
    pub static_dir: Option<PathBuf>,
    /// Largest disk count `POST /start` accepts.
    pub max_rings: Disk,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, static_dir: None, max_rings: DEFAULT_MAX_RINGS }
    }
}

impl ServiceConfig {
    /// Build service config from environment variables.
    ///
    /// All optional:
    /// - `PORT`: default 3000
    /// - `HANOI_STATIC_DIR`: no static files when absent or empty
    /// - `HANOI_MAX_RINGS`: default 10, clamped to `1..=10`
    #[must_use]
    pub fn from_env() -> Self {
        let static_dir = std::env::var("HANOI_STATIC_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        let max_rings = env_parse("HANOI_MAX_RINGS", DEFAULT_MAX_RINGS).clamp(1, DEFAULT_MAX_RINGS);
        Self { port: env_parse("PORT", DEFAULT_PORT), static_dir, max_rings }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
