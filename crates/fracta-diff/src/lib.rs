//! # fracta-diff — async tree-diff engine
//!
//! The engine behind "status" and "diff commit vs commit" queries over a
//! content-addressed object store. Given two commit hashes, it resolves
//! their root trees and recursively compares them, reporting each path as
//! `Added`, `Modified`, `Removed`, or `Ignored` into a [`status::ScmStatus`].
//!
//! ## Architecture
//!
//! - [`store::ObjectStore`]: the three-operation async fetch surface this
//!   crate is built against (`get_commit`, `get_tree`, `get_blob_metadata`).
//! - [`mem_store::MemStore`]: an in-memory store for tests.
//! - [`status`]: the callback protocol results are reported through.
//! - [`context::DiffContext`]: per-run configuration and shared state.
//! - [`engine`]: the recursive merge-walk comparator.
//!
//! ## Design rules
//!
//! - The engine never reads blob bytes except for ignore files — that
//!   capability lives on the separate, narrower [`store::IgnoreFileLoader`]
//!   trait, not on `ObjectStore`.
//! - No descent ever aborts the whole run: a store failure on one subtree
//!   is recorded in `ScmStatus.errors` and siblings continue.
//! - Nothing here configures a `tracing` subscriber; that stays a host
//!   concern, this crate only emits structured events.

pub mod context;
pub mod engine;
pub mod error;
pub mod mem_store;
pub mod status;
pub mod store;

pub use context::{DiffContext, DiffContextBuilder, DiffOptions, DiffRunOptions};
pub use engine::{diff_added_tree, diff_commits, diff_removed_tree, diff_trees};
pub use error::{DiffError, DiffResult};
pub use mem_store::MemStore;
pub use status::{AccumulatingCallback, DiffCallback, ScmStatus, Status};
pub use store::{BlobMetadata, CommitInfo, IgnoreFileLoader, ObjectStore, StoreError};
