//! Access-layer error type.
//!
//! The taxonomy is deliberately shallow: not-found conditions are
//! defaults, not errors, so the only failures that reach callers are
//! store transport problems and documents that no longer decode.

use probation_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("document store error: {0}")]
    Store(#[from] StoreError),

    #[error("malformed document: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AccessError>;
