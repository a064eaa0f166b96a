//! Error types for fontmat

use thiserror::Error;

use crate::serialize::Phase;

pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fontmat
#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization failed: {0}")]
    Serialize(#[from] SerializeError),

    #[error("Store placement failed: {0}")]
    Store(#[from] StoreError),
}

/// Two-pass protocol errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerializeError {
    #[error("{op} called while the session is {phase}")]
    PhaseMismatch { op: &'static str, phase: Phase },

    #[error("static storage exhausted: all {capacity} counted slots are assigned")]
    StorageExhausted { capacity: usize },
}

/// Backing array errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("position {pos} does not extend a store of {len} entries")]
    PositionOutOfBounds { pos: usize, len: usize },
}
