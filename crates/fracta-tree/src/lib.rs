//! # fracta-tree — tree, path, and ignore-rule value types
//!
//! The pure, synchronous value layer underneath the diff engine in
//! `fracta-diff`. Nothing here touches an object store or does I/O: a
//! [`Tree`] is just a sorted, validated entry list; a [`Hash`] is an opaque
//! content identifier; an [`IgnoreStack`] is a composed chain of parsed
//! `.gitignore`-style rule sets.
//!
//! ## Design rules
//!
//! - Values are immutable once constructed — `Tree::new` validates sort
//!   order and uniqueness once so downstream code never re-checks it.
//! - [`RelativePath`] cannot represent an escaping path (`..`, `.`, and
//!   embedded slashes are rejected at construction), so the diff engine
//!   never needs to defend against path traversal.
//! - This crate has no knowledge of the object store or the diff protocol.
//!   `fracta-diff` depends on it; it does not depend back.

pub mod error;
pub mod hash;
pub mod ignore;
pub mod path;
pub mod tree;

pub use error::{TreeError, TreeResult};
pub use hash::Hash;
pub use ignore::{IgnoreOutcome, IgnoreRuleSet, IgnoreStack};
pub use path::RelativePath;
pub use tree::{EntryKind, Tree, TreeEntry};
