//! Composition of [`IgnoreRuleSet`]s into the nested, innermost-scope-first
//! chain consulted during descent.

use std::sync::Arc;

use crate::ignore::rule::IgnoreOutcome;
use crate::ignore::IgnoreRuleSet;
use crate::path::RelativePath;

/// A chain of ignore-rule scopes: system, then user/global, then each
/// `.gitignore` found walking down from the tree root to the current
/// directory. Lookup walks innermost-first; the first scope with an
/// opinion on a path decides the outcome for it.
#[derive(Debug, Clone)]
pub struct IgnoreStack {
    scope: Option<IgnoreRuleSet>,
    parent: Option<Arc<IgnoreStack>>,
}

impl IgnoreStack {
    /// The empty stack: has no opinion on any path.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            scope: None,
            parent: None,
        })
    }

    /// Push one more scope (e.g. a `.gitignore` just discovered while
    /// descending into a subtree) onto an existing stack.
    pub fn push(self: &Arc<Self>, scope: IgnoreRuleSet) -> Arc<Self> {
        Arc::new(Self {
            scope: Some(scope),
            parent: Some(self.clone()),
        })
    }

    /// Evaluate the stack against `path`.
    ///
    /// This does not consider whether any ancestor directory was itself
    /// excluded — the parent-override invariant (once an ancestor is
    /// excluded, its descendants are excluded regardless of a deeper
    /// negation) is threaded explicitly by the diff engine as a boolean,
    /// not reconstructed here.
    pub fn evaluate(&self, path: &RelativePath, is_dir: bool) -> IgnoreOutcome {
        let mut node = self;
        loop {
            if let Some(scope) = &node.scope {
                if let Some(outcome) = scope.match_one(path, is_dir) {
                    return outcome;
                }
            }
            match &node.parent {
                Some(parent) => node = parent,
                None => return IgnoreOutcome::NoOpinion,
            }
        }
    }
}
