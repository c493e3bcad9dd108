//! The immutable directory-tree value model.
//!
//! A [`Tree`] is never mutated in place: fetched trees are values, keyed by
//! their own [`Hash`] in the store. A small content-addressed cache on the
//! store facade (not this crate's concern) is what keeps refetches of
//! shared subtrees cheap.

use crate::error::{TreeError, TreeResult};
use crate::hash::Hash;

/// The kind of a tree entry.
///
/// Equality is strict: a regular file and a symlink with identical bytes
/// are different kinds. Comparing `(kind, hash)` as one key — not just
/// `hash` — is how a mode change (e.g. file ↔ symlink) surfaces as
/// `Modified` instead of being silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EntryKind {
    RegularFile,
    ExecutableFile,
    Symlink,
    Tree,
}

impl EntryKind {
    pub fn is_tree(self) -> bool {
        matches!(self, EntryKind::Tree)
    }
}

/// One named entry within a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TreeEntry {
    pub name: String,
    pub kind: EntryKind,
    pub hash: Hash,
}

/// An immutable, content-addressed directory listing.
///
/// Entries are stored in strict sorted-by-name order; [`Tree::new`]
/// validates this once so the diff engine's merge-walk can rely on it
/// without re-checking at every step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from an already name-sorted, duplicate-free entry list.
    pub fn new(entries: Vec<TreeEntry>) -> TreeResult<Self> {
        for pair in entries.windows(2) {
            match pair[0].name.cmp(&pair[1].name) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    return Err(TreeError::DuplicateName(pair[0].name.clone()));
                }
                std::cmp::Ordering::Greater => {
                    return Err(TreeError::NotSorted(pair[1].name.clone()));
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a direct child by name.
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.entries[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, kind: EntryKind) -> TreeEntry {
        TreeEntry {
            name: name.to_string(),
            kind,
            hash: Hash::of(name.as_bytes()),
        }
    }

    #[test]
    fn accepts_sorted_unique_entries() {
        let tree = Tree::new(vec![
            entry("a", EntryKind::RegularFile),
            entry("b", EntryKind::Tree),
        ])
        .unwrap();
        assert_eq!(tree.entries().len(), 2);
    }

    #[test]
    fn rejects_unsorted_entries() {
        let err = Tree::new(vec![
            entry("b", EntryKind::RegularFile),
            entry("a", EntryKind::RegularFile),
        ])
        .unwrap_err();
        assert!(matches!(err, TreeError::NotSorted(_)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Tree::new(vec![
            entry("a", EntryKind::RegularFile),
            entry("a", EntryKind::Tree),
        ])
        .unwrap_err();
        assert!(matches!(err, TreeError::DuplicateName(_)));
    }

    #[test]
    fn get_finds_direct_child() {
        let tree = Tree::new(vec![
            entry("a", EntryKind::RegularFile),
            entry("b", EntryKind::Tree),
        ])
        .unwrap();
        assert_eq!(tree.get("b").unwrap().kind, EntryKind::Tree);
        assert!(tree.get("c").is_none());
    }

    #[test]
    fn strict_kind_equality_distinguishes_mode() {
        let file = entry("x", EntryKind::RegularFile);
        let mut symlink = entry("x", EntryKind::Symlink);
        symlink.hash = file.hash;
        assert_eq!(file.hash, symlink.hash);
        assert_ne!(file.kind, symlink.kind);
    }
}
