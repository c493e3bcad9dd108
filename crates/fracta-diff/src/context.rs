//! Per-run configuration and shared state for a diff.

use std::collections::HashSet;
use std::sync::Arc;

use fracta_tree::IgnoreStack;

use crate::status::DiffCallback;
use crate::store::{IgnoreFileLoader, ObjectStore};

/// Version-control metadata directories that are never descended into and
/// never reported, regardless of ignore rules.
fn default_hidden_names() -> HashSet<String> {
    [".git", ".hg", ".eden"].into_iter().map(String::from).collect()
}

/// A single diff run's read-mostly bundle: store handle, callback sink, and
/// the knobs that shape classification. Shared by reference among every
/// concurrent subtree task spawned for the run.
///
/// Generic over both the store and the ignore-file loader rather than
/// holding either as a `dyn Trait`: both traits use native `async fn`,
/// which isn't object-safe on stable without boxing every future, so
/// `DiffContext` stays monomorphic over its two collaborators instead of
/// paying that cost. `callback` has no async methods, so it can and does
/// stay a `dyn DiffCallback` — the engine's recursive calls don't need to
/// be generic over it, and callers do want to swap sinks at runtime.
pub struct DiffContext<S: ObjectStore, L: IgnoreFileLoader> {
    pub store: Arc<S>,
    pub callback: Arc<dyn DiffCallback>,
    pub load_ignore_file: Arc<L>,
    pub list_ignored: bool,
    pub hidden_names: HashSet<String>,
}

/// User-settable overrides for a [`DiffContext`]; everything has a sensible
/// default so callers only specify what they want to change.
#[derive(Default)]
pub struct DiffOptions {
    pub list_ignored: Option<bool>,
    pub hidden_names: Option<HashSet<String>>,
}

/// Builds a [`DiffContext`] from a store, a callback, an ignore-file loader,
/// and optional [`DiffOptions`], so callers assemble one in-memory run's
/// configuration instead of passing positional arguments.
pub struct DiffContextBuilder<S: ObjectStore, L: IgnoreFileLoader> {
    store: Arc<S>,
    callback: Arc<dyn DiffCallback>,
    load_ignore_file: Arc<L>,
    options: DiffOptions,
}

impl<S: ObjectStore, L: IgnoreFileLoader> DiffContextBuilder<S, L> {
    pub fn new(store: Arc<S>, callback: Arc<dyn DiffCallback>, load_ignore_file: Arc<L>) -> Self {
        Self {
            store,
            callback,
            load_ignore_file,
            options: DiffOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> DiffContext<S, L> {
        DiffContext {
            store: self.store,
            callback: self.callback,
            load_ignore_file: self.load_ignore_file,
            list_ignored: self.options.list_ignored.unwrap_or(true),
            hidden_names: self.options.hidden_names.unwrap_or_else(default_hidden_names),
        }
    }
}

/// The bundle [`crate::engine::diff_commits`] takes in place of positional
/// arguments: the ignore-file loader, the starting ignore stack (default
/// empty — no system/user-global layers), and `list_ignored` (default
/// true). `load_ignore_file` is the one required piece; everything else
/// has a sensible default overridable via the chained `with_*` methods.
pub struct DiffRunOptions<L: IgnoreFileLoader> {
    pub load_ignore_file: Arc<L>,
    pub ignore_stack: Arc<IgnoreStack>,
    pub list_ignored: bool,
}

impl<L: IgnoreFileLoader> DiffRunOptions<L> {
    pub fn new(load_ignore_file: Arc<L>) -> Self {
        Self {
            load_ignore_file,
            ignore_stack: IgnoreStack::empty(),
            list_ignored: true,
        }
    }

    /// Start the run with a pre-populated ignore stack (e.g. system or
    /// user-global rules loaded above the tree root) instead of the empty
    /// default.
    pub fn with_ignore_stack(mut self, ignore_stack: Arc<IgnoreStack>) -> Self {
        self.ignore_stack = ignore_stack;
        self
    }

    pub fn with_list_ignored(mut self, list_ignored: bool) -> Self {
        self.list_ignored = list_ignored;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem_store::MemStore;
    use crate::status::AccumulatingCallback;

    #[test]
    fn defaults_list_ignored_true_and_standard_hidden_names() {
        let store = Arc::new(MemStore::new());
        let callback: Arc<dyn DiffCallback> = Arc::new(AccumulatingCallback::new());
        let loader = store.clone();
        let ctx = DiffContextBuilder::new(store, callback, loader).build();

        assert!(ctx.list_ignored);
        assert!(ctx.hidden_names.contains(".git"));
        assert!(ctx.hidden_names.contains(".hg"));
        assert!(ctx.hidden_names.contains(".eden"));
    }

    #[test]
    fn options_override_defaults() {
        let store = Arc::new(MemStore::new());
        let callback: Arc<dyn DiffCallback> = Arc::new(AccumulatingCallback::new());
        let loader = store.clone();
        let ctx = DiffContextBuilder::new(store, callback, loader)
            .with_options(DiffOptions {
                list_ignored: Some(false),
                hidden_names: None,
            })
            .build();

        assert!(!ctx.list_ignored);
    }

    #[test]
    fn diff_run_options_default_to_empty_stack_and_list_ignored_true() {
        let store = Arc::new(MemStore::new());
        let options = DiffRunOptions::new(store);

        assert!(options.list_ignored);
        assert_eq!(
            options.ignore_stack.evaluate(&fracta_tree::RelativePath::root(), true),
            fracta_tree::IgnoreOutcome::NoOpinion
        );
    }

    #[test]
    fn diff_run_options_with_methods_override_defaults() {
        let store = Arc::new(MemStore::new());
        let stack = IgnoreStack::empty().push(fracta_tree::IgnoreRuleSet::parse(
            b"*.log",
            fracta_tree::RelativePath::root(),
        ));
        let options = DiffRunOptions::new(store)
            .with_ignore_stack(stack)
            .with_list_ignored(false);

        assert!(!options.list_ignored);
        assert_eq!(
            options.ignore_stack.evaluate(&fracta_tree::RelativePath::parse("a.log").unwrap(), false),
            fracta_tree::IgnoreOutcome::Excluded
        );
    }
}
