//! The object-store facade the diff engine is built against.
//!
//! The engine never reads blob bytes except for ignore files — that
//! narrower capability lives on [`IgnoreFileLoader`], a separate trait, so
//! the type system (not convention) enforces the boundary.

use fracta_tree::{Hash, RelativePath, Tree};

/// Failures from a store lookup.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(Hash),

    #[error("backend error: {0}")]
    Backend(String),
}

/// The root tree a commit points at. Nothing else about a commit is
/// consumed by the diff engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitInfo {
    pub root_tree_hash: Hash,
}

/// Enough about a blob to decide content equality without reading its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobMetadata {
    pub size: Option<u64>,
    pub content_hash: Hash,
}

/// Async key-addressed fetch surface: `Commit -> RootTreeHash`,
/// `TreeHash -> Tree`, `BlobHash -> metadata`. The diff engine consumes only
/// these three operations.
///
/// Implemented as a native `async fn` trait (stable since 1.75) rather than
/// via `#[async_trait]`: every consumer of this trait is generic over `S:
/// ObjectStore`, never a trait object, so there's no dyn-safety need to pay
/// the boxing cost for.
pub trait ObjectStore: Send + Sync {
    async fn get_commit(&self, hash: Hash) -> Result<CommitInfo, StoreError>;

    async fn get_tree(&self, hash: Hash) -> Result<Tree, StoreError>;

    async fn get_blob_metadata(&self, hash: Hash) -> Result<BlobMetadata, StoreError>;
}

/// Loads the raw bytes of an ignore file at a given path, once per file
/// encountered during descent. An empty result means no such file exists at
/// that path — not an error.
pub trait IgnoreFileLoader: Send + Sync {
    async fn load(&self, path: &RelativePath) -> Result<Vec<u8>, StoreError>;
}
