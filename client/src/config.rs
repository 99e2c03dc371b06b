//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_STEP_DELAY_MS: u64 = 600;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for SyncTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root without a trailing slash.
    pub base_url: String,
    pub timeouts: SyncTimeouts,
    /// Pause between auto-solve snapshots.
    pub step_delay_ms: u64,
    /// Render loop period.
    pub frame_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeouts: SyncTimeouts::default(),
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl ClientConfig {
    /// Build client config from environment variables.
    ///
    /// All optional:
    /// - `HANOI_BASE_URL`: default `http://127.0.0.1:3000`
    /// - `HANOI_REQUEST_TIMEOUT_SECS`: default 10
    /// - `HANOI_CONNECT_TIMEOUT_SECS`: default 5
    /// - `HANOI_STEP_DELAY_MS`: default 600
    /// - `HANOI_FRAME_INTERVAL_MS`: default 16
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("HANOI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeouts: SyncTimeouts {
                request_secs: env_parse_u64("HANOI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse_u64("HANOI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
            step_delay_ms: env_parse_u64("HANOI_STEP_DELAY_MS", DEFAULT_STEP_DELAY_MS),
            frame_interval_ms: env_parse_u64("HANOI_FRAME_INTERVAL_MS", DEFAULT_FRAME_INTERVAL_MS),
        }
    }

    /// Same settings pointed at another service.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        base_url.trim_end_matches('/').clone_into(&mut self.base_url);
        self
    }

    #[must_use]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
