//! Shared tree-building helpers for the scenario tests.

use fracta_tree::{EntryKind, Hash, RelativePath, Tree, TreeEntry};
use fracta_diff::{CommitInfo, MemStore};

/// Builds trees bottom-up against a [`MemStore`], registering each
/// directory's entries and returning the [`TreeEntry`] that names it within
/// its parent.
pub struct TreeBuilder<'a> {
    pub store: &'a MemStore,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(store: &'a MemStore) -> Self {
        Self { store }
    }

    pub fn file(&self, name: &str, contents: &[u8]) -> TreeEntry {
        TreeEntry {
            name: name.to_string(),
            kind: EntryKind::RegularFile,
            hash: self.store.put_blob_bytes(contents),
        }
    }

    pub fn symlink(&self, name: &str, target: &[u8]) -> TreeEntry {
        TreeEntry {
            name: name.to_string(),
            kind: EntryKind::Symlink,
            hash: self.store.put_blob_bytes(target),
        }
    }

    /// Registers a directory's entries (sorted by name) as a `Tree` in the
    /// store and returns the `TreeEntry` for it.
    pub fn dir(&self, name: &str, mut entries: Vec<TreeEntry>) -> TreeEntry {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let tree = Tree::new(entries).expect("entries sorted by construction");
        let hash = Hash::of(format!("{tree:?}").as_bytes());
        self.store.put_tree(hash, tree);
        TreeEntry {
            name: name.to_string(),
            kind: EntryKind::Tree,
            hash,
        }
    }

    /// Registers a root tree (no containing name) and returns its hash.
    pub fn root(&self, mut entries: Vec<TreeEntry>) -> Hash {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let tree = Tree::new(entries).expect("entries sorted by construction");
        let hash = Hash::of(format!("root:{tree:?}").as_bytes());
        self.store.put_tree(hash, tree);
        hash
    }

    pub fn commit(&self, root_tree_hash: Hash) -> Hash {
        let commit_hash = Hash::of(format!("commit:{root_tree_hash}").as_bytes());
        self.store.put_commit(commit_hash, CommitInfo { root_tree_hash });
        commit_hash
    }
}

pub fn path(raw: &str) -> RelativePath {
    RelativePath::parse(raw).unwrap()
}
