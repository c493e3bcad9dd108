//! Canonical relative paths rooted at a tree root.
//!
//! A [`RelativePath`] can never escape its root: every segment is validated
//! at construction, so `.`, `..`, and empty segments are rejected outright
//! rather than normalized away.

use std::fmt;

use crate::error::{TreeError, TreeResult};

/// A path relative to a tree root. The empty path denotes the root itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RelativePath {
    segments: Vec<Box<str>>,
}

impl RelativePath {
    /// The root of the tree.
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parse a `/`-separated path. The empty string parses to the root;
    /// `.`, `..`, and doubled/leading/trailing slashes are rejected.
    pub fn parse(raw: &str) -> TreeResult<Self> {
        if raw.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = Vec::new();
        for segment in raw.split('/') {
            Self::validate_segment(segment)?;
            segments.push(segment.into());
        }
        Ok(Self { segments })
    }

    /// Append one tree-entry name as a new path segment.
    pub fn join(&self, name: &str) -> TreeResult<Self> {
        Self::validate_segment(name)?;
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Box<str>] {
        &self.segments
    }

    /// Strip `prefix` from the front of `self`, returning the remainder
    /// (the root if `self == prefix`). `None` if `self` does not lie under
    /// `prefix`.
    pub fn strip_prefix(&self, prefix: &RelativePath) -> Option<RelativePath> {
        if self.segments.len() < prefix.segments.len() {
            return None;
        }
        if self.segments[..prefix.segments.len()] != prefix.segments[..] {
            return None;
        }
        Some(RelativePath {
            segments: self.segments[prefix.segments.len()..].to_vec(),
        })
    }

    fn validate_segment(segment: &str) -> TreeResult<()> {
        if segment.is_empty() || segment == "." || segment == ".." || segment.contains('/') {
            return Err(TreeError::InvalidSegment(segment.to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .segments
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join("/");
        write!(f, "{joined}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_parses_to_root() {
        assert!(RelativePath::parse("").unwrap().is_root());
    }

    #[test]
    fn join_builds_up_segments() {
        let root = RelativePath::root();
        let a = root.join("a").unwrap();
        let ab = a.join("b").unwrap();
        assert_eq!(ab.to_string(), "a/b");
    }

    #[test]
    fn join_rejects_dotdot_and_embedded_slash() {
        let root = RelativePath::root();
        assert!(root.join("..").is_err());
        assert!(root.join(".").is_err());
        assert!(root.join("a/b").is_err());
        assert!(root.join("").is_err());
    }

    #[test]
    fn strip_prefix_returns_remainder() {
        let full = RelativePath::parse("a/b/c").unwrap();
        let prefix = RelativePath::parse("a/b").unwrap();
        assert_eq!(full.strip_prefix(&prefix).unwrap().to_string(), "c");
    }

    #[test]
    fn strip_prefix_none_when_not_under_prefix() {
        let full = RelativePath::parse("a/b/c").unwrap();
        let other = RelativePath::parse("x").unwrap();
        assert!(full.strip_prefix(&other).is_none());
    }

    #[test]
    fn strip_prefix_of_self_is_root() {
        let p = RelativePath::parse("a/b").unwrap();
        assert!(p.strip_prefix(&p).unwrap().is_root());
    }
}
