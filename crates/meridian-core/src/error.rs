//! Boundary error for remote fetches.

use std::time::Duration;

use thiserror::Error;

/// Errors crossing the remote-accessor boundary.
///
/// A fetch that fails with any of these leaves the client-side graph
/// untouched: merges apply only after a complete, decoded response.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("remote endpoint returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed response: {0}")]
    Decode(String),
}
