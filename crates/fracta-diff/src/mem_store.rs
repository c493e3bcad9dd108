//! An in-memory [`ObjectStore`] and [`IgnoreFileLoader`] test double.
//!
//! Not part of the engine's production surface — analogous to Mononoke's
//! `memblob`, this exists purely so the diff engine's own tests (and a
//! caller's integration tests) never need a real backend.

use std::collections::HashMap;
use std::sync::Mutex;

use fracta_tree::{Hash, RelativePath, Tree};

use crate::store::{BlobMetadata, CommitInfo, IgnoreFileLoader, ObjectStore, StoreError};

/// Three independent maps, one per kind of object the engine fetches, plus
/// a fourth for ignore-file bytes keyed by path.
#[derive(Default)]
pub struct MemStore {
    commits: Mutex<HashMap<Hash, CommitInfo>>,
    trees: Mutex<HashMap<Hash, Tree>>,
    blobs: Mutex<HashMap<Hash, BlobMetadata>>,
    ignore_files: Mutex<HashMap<RelativePath, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_commit(&self, hash: Hash, info: CommitInfo) {
        self.commits.lock().unwrap().insert(hash, info);
    }

    pub fn put_tree(&self, hash: Hash, tree: Tree) {
        self.trees.lock().unwrap().insert(hash, tree);
    }

    pub fn put_blob(&self, hash: Hash, metadata: BlobMetadata) {
        self.blobs.lock().unwrap().insert(hash, metadata);
    }

    /// Content-address a file's bytes and register its metadata under the
    /// resulting hash in one step, returning that hash for use as a
    /// `TreeEntry::hash`.
    pub fn put_blob_bytes(&self, data: &[u8]) -> Hash {
        let hash = Hash::of(data);
        self.put_blob(
            hash,
            BlobMetadata {
                size: Some(data.len() as u64),
                content_hash: hash,
            },
        );
        hash
    }

    pub fn put_ignore_file(&self, path: RelativePath, content: impl Into<Vec<u8>>) {
        self.ignore_files.lock().unwrap().insert(path, content.into());
    }
}

impl ObjectStore for MemStore {
    async fn get_commit(&self, hash: Hash) -> Result<CommitInfo, StoreError> {
        self.commits
            .lock()
            .unwrap()
            .get(&hash)
            .copied()
            .ok_or(StoreError::NotFound(hash))
    }

    async fn get_tree(&self, hash: Hash) -> Result<Tree, StoreError> {
        self.trees
            .lock()
            .unwrap()
            .get(&hash)
            .cloned()
            .ok_or(StoreError::NotFound(hash))
    }

    async fn get_blob_metadata(&self, hash: Hash) -> Result<BlobMetadata, StoreError> {
        self.blobs
            .lock()
            .unwrap()
            .get(&hash)
            .cloned()
            .ok_or(StoreError::NotFound(hash))
    }
}

impl IgnoreFileLoader for MemStore {
    async fn load(&self, path: &RelativePath) -> Result<Vec<u8>, StoreError> {
        Ok(self
            .ignore_files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_default())
    }
}
