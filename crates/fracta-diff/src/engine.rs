//! The recursive, lazy, concurrency-aware tree-diff algorithm.
//!
//! `diff_trees`, `diff_added_tree`, and `diff_removed_tree` are mutually
//! recursive `async fn`s; since a recursive `async fn` has unbounded type
//! size, every recursive call is boxed with [`Box::pin`]. Per-entry work
//! within one directory is issued without awaiting each other first, then
//! joined with [`futures::future::join_all`] — the directory's own future
//! resolves only once every child has.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use fracta_tree::{Hash, IgnoreOutcome, IgnoreRuleSet, IgnoreStack, RelativePath, Tree, TreeEntry};
use futures::future::join_all;
use tracing::{debug, info_span, instrument, trace, warn, Instrument};

use crate::context::{DiffContext, DiffRunOptions};
use crate::error::{DiffError, DiffResult};
use crate::status::Status;
use crate::store::{IgnoreFileLoader, ObjectStore};

const GITIGNORE_NAME: &str = ".gitignore";

type BoxFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Resolves two commit hashes to root trees and diffs them, returning the
/// accumulated result. The only entry point that can fail the whole run —
/// every other failure is localized into the returned status's error map.
#[instrument(skip(store, options))]
pub async fn diff_commits<S, L>(
    store: Arc<S>,
    left_commit: Hash,
    right_commit: Hash,
    options: DiffRunOptions<L>,
) -> DiffResult<crate::status::ScmStatus>
where
    S: ObjectStore + 'static,
    L: IgnoreFileLoader + 'static,
{
    let left = store
        .get_commit(left_commit)
        .await
        .map_err(|e| commit_error(left_commit, e))?;
    let right = store
        .get_commit(right_commit)
        .await
        .map_err(|e| commit_error(right_commit, e))?;

    let callback = Arc::new(crate::status::AccumulatingCallback::new());
    let ctx = crate::context::DiffContextBuilder::new(
        store,
        callback.clone() as Arc<dyn crate::status::DiffCallback>,
        options.load_ignore_file,
    )
    .with_options(crate::context::DiffOptions {
        list_ignored: Some(options.list_ignored),
        hidden_names: None,
    })
    .build();

    if left.root_tree_hash != right.root_tree_hash {
        diff_trees(
            &ctx,
            RelativePath::root(),
            left.root_tree_hash,
            right.root_tree_hash,
            options.ignore_stack,
            false,
        )
        .await;
    }

    // Drop ctx's reference to the callback before unwrapping so the Arc
    // below is guaranteed unique.
    drop(ctx);
    Ok(Arc::try_unwrap(callback)
        .expect("ctx held the only other strong reference and was just dropped")
        .into_status())
}

fn commit_error(hash: Hash, err: crate::store::StoreError) -> DiffError {
    match err {
        crate::store::StoreError::NotFound(h) => DiffError::CommitNotFound(h),
        crate::store::StoreError::Backend(msg) => DiffError::Store(hash, msg),
    }
}

/// Compare two trees at `path`. Precondition: `hash_l != hash_r` (equal
/// hashes are the fast path every caller should already have short-circuited
/// on; this function doesn't re-check it, since the merge walk handles equal
/// subtrees correctly anyway, just less cheaply).
pub fn diff_trees<'a, S, L>(
    ctx: &'a DiffContext<S, L>,
    path: RelativePath,
    hash_l: Hash,
    hash_r: Hash,
    ignore_stack: Arc<IgnoreStack>,
    parent_ignored: bool,
) -> BoxFuture<'a>
where
    S: ObjectStore + 'static,
    L: IgnoreFileLoader + 'static,
{
    let span = info_span!("diff_trees", path = %path);
    Box::pin(async move {
        let (left, right) = futures::join!(ctx.store.get_tree(hash_l), ctx.store.get_tree(hash_r));

        let (left, right) = match (left, right) {
            (Ok(l), Ok(r)) => (l, r),
            (Err(e), _) => {
                warn!(error = %e, "failed to load left tree");
                ctx.callback.record_error(path, e.to_string());
                return;
            }
            (_, Err(e)) => {
                warn!(error = %e, "failed to load right tree");
                ctx.callback.record_error(path, e.to_string());
                return;
            }
        };

        let ignore_stack = push_gitignore_scope(ctx, &path, &right, ignore_stack).await;

        let mut futures_for_children: Vec<BoxFuture<'a>> = Vec::new();
        let (mut i, mut j) = (0usize, 0usize);
        let left_entries = left.entries();
        let right_entries = right.entries();

        while i < left_entries.len() || j < right_entries.len() {
            let cmp = match (left_entries.get(i), right_entries.get(j)) {
                (Some(l), Some(r)) => Some(l.name.cmp(&r.name)),
                (Some(_), None) => Some(std::cmp::Ordering::Less),
                (None, Some(_)) => Some(std::cmp::Ordering::Greater),
                (None, None) => None,
            };

            match cmp {
                Some(std::cmp::Ordering::Less) => {
                    let entry = &left_entries[i];
                    if !ctx.hidden_names.contains(&entry.name) {
                        let child_path = join_path(&path, &entry.name);
                        futures_for_children.push(removed_entry_future(ctx, child_path, entry));
                    }
                    i += 1;
                }
                Some(std::cmp::Ordering::Greater) => {
                    let entry = &right_entries[j];
                    if !ctx.hidden_names.contains(&entry.name) {
                        let child_path = join_path(&path, &entry.name);
                        futures_for_children.push(added_entry_future(
                            ctx,
                            child_path,
                            entry,
                            ignore_stack.clone(),
                            parent_ignored,
                        ));
                    }
                    j += 1;
                }
                Some(std::cmp::Ordering::Equal) => {
                    let l_entry = &left_entries[i];
                    let r_entry = &right_entries[j];
                    if !ctx.hidden_names.contains(&l_entry.name) {
                        let child_path = join_path(&path, &l_entry.name);
                        futures_for_children.push(matched_entry_future(
                            ctx,
                            child_path,
                            l_entry,
                            r_entry,
                            ignore_stack.clone(),
                            parent_ignored,
                        ));
                    }
                    i += 1;
                    j += 1;
                }
                None => unreachable!("loop condition guarantees a cursor is in range"),
            }
        }

        join_all(futures_for_children).await;
    }.instrument(span))
}

/// Every entry reachable under `hash_r` becomes `Added` or (if excluded by
/// the ignore stack or an ignored ancestor) `Ignored`. Directories that are
/// themselves excluded force `parent_ignored = true` for their own
/// recursive call, enforcing the parent-override invariant.
pub fn diff_added_tree<'a, S, L>(
    ctx: &'a DiffContext<S, L>,
    path: RelativePath,
    hash_r: Hash,
    ignore_stack: Arc<IgnoreStack>,
    parent_ignored: bool,
) -> BoxFuture<'a>
where
    S: ObjectStore + 'static,
    L: IgnoreFileLoader + 'static,
{
    let span = info_span!("diff_added_tree", path = %path);
    Box::pin(
        async move {
            let tree = match ctx.store.get_tree(hash_r).await {
                Ok(t) => t,
                Err(e) => {
                    warn!(error = %e, "failed to load added tree");
                    ctx.callback.record_error(path, e.to_string());
                    return;
                }
            };

            let ignore_stack = push_gitignore_scope(ctx, &path, &tree, ignore_stack).await;

            let futures_for_children: Vec<BoxFuture<'a>> = tree
                .entries()
                .iter()
                .filter(|entry| !ctx.hidden_names.contains(&entry.name))
                .map(|entry| {
                    let child_path = join_path(&path, &entry.name);
                    added_entry_future(ctx, child_path, entry, ignore_stack.clone(), parent_ignored)
                })
                .collect();

            join_all(futures_for_children).await;
        }
        .instrument(span),
    )
}

/// Every entry reachable under `hash_l` becomes `Removed`. Ignore rules are
/// never consulted: a tracked-then-deleted path is always reported.
pub fn diff_removed_tree<'a, S, L>(ctx: &'a DiffContext<S, L>, path: RelativePath, hash_l: Hash) -> BoxFuture<'a>
where
    S: ObjectStore + 'static,
    L: IgnoreFileLoader + 'static,
{
    let span = info_span!("diff_removed_tree", path = %path);
    Box::pin(
        async move {
            let tree = match ctx.store.get_tree(hash_l).await {
                Ok(t) => t,
                Err(e) => {
                    warn!(error = %e, "failed to load removed tree");
                    ctx.callback.record_error(path, e.to_string());
                    return;
                }
            };

            let futures_for_children: Vec<BoxFuture<'a>> = tree
                .entries()
                .iter()
                .filter(|entry| !ctx.hidden_names.contains(&entry.name))
                .map(|entry| removed_entry_future(ctx, join_path(&path, &entry.name), entry))
                .collect();

            join_all(futures_for_children).await;
        }
        .instrument(span),
    )
}

fn removed_entry_future<'a, S, L>(ctx: &'a DiffContext<S, L>, path: RelativePath, entry: &TreeEntry) -> BoxFuture<'a>
where
    S: ObjectStore + 'static,
    L: IgnoreFileLoader + 'static,
{
    if entry.kind.is_tree() {
        diff_removed_tree(ctx, path, entry.hash)
    } else {
        Box::pin(async move {
            ctx.callback.record_status(path, Status::Removed);
        })
    }
}

fn added_entry_future<'a, S, L>(
    ctx: &'a DiffContext<S, L>,
    path: RelativePath,
    entry: &TreeEntry,
    ignore_stack: Arc<IgnoreStack>,
    parent_ignored: bool,
) -> BoxFuture<'a>
where
    S: ObjectStore + 'static,
    L: IgnoreFileLoader + 'static,
{
    let is_dir = entry.kind.is_tree();
    let excluded = parent_ignored || matches!(ignore_stack.evaluate(&path, is_dir), IgnoreOutcome::Excluded);

    if is_dir {
        let hash = entry.hash;
        if excluded {
            trace!(%path, "excluded directory still descended for ignore bookkeeping");
        }
        diff_added_tree(ctx, path, hash, ignore_stack, excluded)
    } else {
        Box::pin(async move {
            if excluded {
                debug!(%path, "added leaf excluded by ignore stack");
                if ctx.list_ignored {
                    ctx.callback.record_status(path, Status::Ignored);
                }
            } else {
                ctx.callback.record_status(path, Status::Added);
            }
        })
    }
}

fn matched_entry_future<'a, S, L>(
    ctx: &'a DiffContext<S, L>,
    path: RelativePath,
    l_entry: &TreeEntry,
    r_entry: &TreeEntry,
    ignore_stack: Arc<IgnoreStack>,
    parent_ignored: bool,
) -> BoxFuture<'a>
where
    S: ObjectStore + 'static,
    L: IgnoreFileLoader + 'static,
{
    if l_entry.kind == r_entry.kind {
        if l_entry.kind.is_tree() {
            if l_entry.hash == r_entry.hash {
                return Box::pin(async {});
            }
            return diff_trees(ctx, path, l_entry.hash, r_entry.hash, ignore_stack, parent_ignored);
        }

        if l_entry.hash == r_entry.hash {
            return Box::pin(async {});
        }

        let (l_hash, r_hash) = (l_entry.hash, r_entry.hash);
        return Box::pin(async move {
            let (left, right) = futures::join!(
                ctx.store.get_blob_metadata(l_hash),
                ctx.store.get_blob_metadata(r_hash)
            );
            match (left, right) {
                (Ok(_), Ok(_)) => ctx.callback.record_status(path, Status::Modified),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(error = %e, "failed content-equality check");
                    ctx.callback.record_error(path, e.to_string());
                }
            }
        });
    }

    // Kind change. Neither side tree: a single Modified, no blob fetch.
    if !l_entry.kind.is_tree() && !r_entry.kind.is_tree() {
        return Box::pin(async move {
            ctx.callback.record_status(path, Status::Modified);
        });
    }

    // Exactly one side is a tree: the non-tree side gets a single leaf
    // status, the tree side recurses over its own descendants. The
    // directory path itself is never double-counted.
    if l_entry.kind.is_tree() {
        let l_hash = l_entry.hash;
        let r_path = path.clone();
        let excluded = parent_ignored || matches!(ignore_stack.evaluate(&path, false), IgnoreOutcome::Excluded);
        Box::pin(async move {
            futures::join!(diff_removed_tree(ctx, path, l_hash), async {
                if excluded {
                    if ctx.list_ignored {
                        ctx.callback.record_status(r_path, Status::Ignored);
                    }
                } else {
                    ctx.callback.record_status(r_path, Status::Added);
                }
            });
        })
    } else {
        let r_hash = r_entry.hash;
        let l_path = path.clone();
        Box::pin(async move {
            futures::join!(
                async {
                    ctx.callback.record_status(l_path, Status::Removed);
                },
                diff_added_tree(ctx, path, r_hash, ignore_stack, parent_ignored)
            );
        })
    }
}

/// If `tree` contains a `.gitignore` entry at this level, load its contents
/// and push a new scope onto `ignore_stack` for this subtree's descent. A
/// load failure is recorded at the `.gitignore` path itself; descent
/// continues using the parent stack (best-effort ignore evaluation).
async fn push_gitignore_scope<S, L>(
    ctx: &DiffContext<S, L>,
    path: &RelativePath,
    tree: &Tree,
    ignore_stack: Arc<IgnoreStack>,
) -> Arc<IgnoreStack>
where
    S: ObjectStore,
    L: IgnoreFileLoader,
{
    let Some(entry) = tree.get(GITIGNORE_NAME) else {
        return ignore_stack;
    };
    if entry.kind.is_tree() {
        return ignore_stack;
    }

    let ignore_path = join_path(path, GITIGNORE_NAME);
    match ctx.load_ignore_file.load(&ignore_path).await {
        Ok(content) => ignore_stack.push(IgnoreRuleSet::parse(&content, path.clone())),
        Err(e) => {
            warn!(error = %e, path = %ignore_path, "failed to load .gitignore");
            ctx.callback.record_error(ignore_path, e.to_string());
            ignore_stack
        }
    }
}

fn join_path(base: &RelativePath, name: &str) -> RelativePath {
    base.join(name).expect("tree entry names are validated segments")
}
