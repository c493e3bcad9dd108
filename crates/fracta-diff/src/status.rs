//! The diff callback protocol: the sink the engine reports into.

use std::collections::HashMap;
use std::sync::Mutex;

use fracta_tree::RelativePath;

/// The classification of one path in a diff run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Status {
    Added,
    Modified,
    Removed,
    Ignored,
}

/// The accumulated result of a diff run: a map of classified paths plus a
/// map of paths that could not be classified due to a localized store error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScmStatus {
    pub entries: HashMap<RelativePath, Status>,
    pub errors: HashMap<RelativePath, String>,
}

/// A sink receiving `(path, status)` and `(path, error)` events as the
/// engine discovers them. Must be safe for concurrent invocation — the
/// engine's executor may schedule callbacks for sibling subtrees in
/// parallel. Invoked at most once per `(path, status)` pair.
pub trait DiffCallback: Send + Sync {
    fn record_status(&self, path: RelativePath, status: Status);
    fn record_error(&self, path: RelativePath, message: String);
}

/// The callback implementation used by [`crate::engine::diff_commits`]: a
/// single mutex guarding both maps, per the accumulating-sink design.
#[derive(Debug, Default)]
pub struct AccumulatingCallback {
    inner: Mutex<ScmStatus>,
}

impl AccumulatingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the callback and return what it accumulated.
    pub fn into_status(self) -> ScmStatus {
        self.inner.into_inner().unwrap()
    }
}

impl DiffCallback for AccumulatingCallback {
    fn record_status(&self, path: RelativePath, status: Status) {
        self.inner.lock().unwrap().entries.insert(path, status);
    }

    fn record_error(&self, path: RelativePath, message: String) {
        self.inner.lock().unwrap().errors.insert(path, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_status_and_errors_independently() {
        let callback = AccumulatingCallback::new();
        let added = RelativePath::parse("a.txt").unwrap();
        let broken = RelativePath::parse("x/y/z").unwrap();

        callback.record_status(added.clone(), Status::Added);
        callback.record_error(broken.clone(), "backend error".to_string());

        let status = callback.into_status();
        assert_eq!(status.entries.get(&added), Some(&Status::Added));
        assert_eq!(status.errors.get(&broken).map(String::as_str), Some("backend error"));
    }
}
