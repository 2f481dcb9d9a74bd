//! Error types for the meridian-explore crate.

use thiserror::Error;

use meridian_core::FetchError;

#[derive(Error, Debug)]
pub enum ExploreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, ExploreError>;
