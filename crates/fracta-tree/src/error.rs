//! Errors from path and tree construction.

/// Errors raised while building the value types in this crate.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("invalid path segment: {0:?}")]
    InvalidSegment(String),

    #[error("invalid hash: {0:?}")]
    InvalidHash(String),

    #[error("tree entries out of order at {0:?}")]
    NotSorted(String),

    #[error("duplicate entry name {0:?} in tree")]
    DuplicateName(String),
}

/// Convenience alias for results in this crate.
pub type TreeResult<T> = Result<T, TreeError>;
