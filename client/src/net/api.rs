//! Game service API.
//!
//! DESIGN
//! ======
//! [`GameApi`] is the seam between the session and the network. The session
//! only sees typed results; [`HttpGameApi`] owns the URLs, the timeouts and
//! the body parsing. Parsing lives in free functions so it can be tested
//! without a server.
//!
//! Every board coming back from the service is validated before it is handed
//! out. A board that breaks the invariants is an error, never a picture.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use board::wire::{SolveResponse, StartResponse, StateResponse};
use board::{Board, Disk, MoveOutcome};
use tracing::debug;

use super::error::SyncError;
use crate::config::ClientConfig;

/// Logical operations of the game service.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    /// Reset the service to a fresh game of `rings` disks.
    async fn start_game(&self, rings: Disk) -> Result<StartResponse, SyncError>;

    /// Ask for the top disk of `src` to go onto `dst`. Illegal moves come
    /// back as [`MoveOutcome::Rejected`], not as errors.
    async fn attempt_move(&self, src: usize, dst: usize) -> Result<MoveOutcome, SyncError>;

    /// Revert the last accepted move. The body is ignored.
    async fn undo_last_move(&self) -> Result<(), SyncError>;

    /// Current authoritative board, validated.
    async fn fetch_state(&self) -> Result<Board, SyncError>;

    /// Snapshots from the current reset state to solved, validated.
    async fn request_solution(&self) -> Result<Vec<Board>, SyncError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpGameApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGameApi {
    /// Build a client for `config.base_url` with its timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| SyncError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, method: reqwest::Method, path: &str) -> Result<String, SyncError> {
        let url = endpoint(&self.base_url, path);
        debug!(%method, %url, "game service request");

        let response = self
            .http
            .request(method, &url)
            .send()
            .await
            .map_err(|e| SyncError::from_transport(&e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| SyncError::from_transport(&e))?;

        if !(200..300).contains(&status) {
            return Err(rejected(status, &text));
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl GameApi for HttpGameApi {
    async fn start_game(&self, rings: Disk) -> Result<StartResponse, SyncError> {
        let text = self.send(reqwest::Method::POST, &format!("/start?rings={rings}")).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn attempt_move(&self, src: usize, dst: usize) -> Result<MoveOutcome, SyncError> {
        let text = self.send(reqwest::Method::POST, &format!("/move?src={src}&dst={dst}")).await?;
        parse_move_outcome(&text)
    }

    async fn undo_last_move(&self) -> Result<(), SyncError> {
        self.send(reqwest::Method::POST, "/undo").await?;
        Ok(())
    }

    async fn fetch_state(&self) -> Result<Board, SyncError> {
        let text = self.send(reqwest::Method::GET, "/state").await?;
        parse_state(&text)
    }

    async fn request_solution(&self) -> Result<Vec<Board>, SyncError> {
        let text = self.send(reqwest::Method::POST, "/solve").await?;
        parse_solution(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn rejected(status: u16, body: &str) -> SyncError {
    let message = body.trim();
    let message = if message.is_empty() { format!("HTTP {status}") } else { message.to_owned() };
    SyncError::Rejected { status, message }
}

fn parse_move_outcome(text: &str) -> Result<MoveOutcome, SyncError> {
    Ok(serde_json::from_str(text)?)
}

fn parse_state(text: &str) -> Result<Board, SyncError> {
    let state: StateResponse = serde_json::from_str(text)?;
    state.board.validate()?;
    Ok(state.board)
}

fn parse_solution(text: &str) -> Result<Vec<Board>, SyncError> {
    let solution: SolveResponse = serde_json::from_str(text)?;
    for step in &solution.steps {
        step.validate()?;
    }
    Ok(solution.steps)
}
