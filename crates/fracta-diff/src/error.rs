//! Errors surfaced above the per-path `errors` map carried in [`crate::status::ScmStatus`].

use fracta_tree::Hash;

/// Top-level failures from a [`crate::engine::diff_commits`] call.
///
/// Every other failure during a diff run is captured and localized to a
/// path inside `ScmStatus.errors` instead of propagated here — only commit
/// resolution can fail the whole run.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("commit not found: {0}")]
    CommitNotFound(Hash),

    #[error("store error resolving commit {0}: {1}")]
    Store(Hash, String),
}

pub type DiffResult<T> = Result<T, DiffError>;
