//! Gitignore-style ignore rules for the diff engine.
//!
//! Patterns are parsed per ignore file into an [`IgnoreRuleSet`]; sets
//! compose into an [`IgnoreStack`] that mirrors directory nesting plus any
//! system/user-global layers declared above the tree root.

mod rule;
mod stack;

pub use rule::{IgnoreOutcome, IgnoreRuleSet};
pub use stack::IgnoreStack;

/// Default ignore patterns every diff run starts from before any
/// repo-specific `.gitignore` is layered on top.
pub const DEFAULT_IGNORE: &str = "\
# Version control metadata (also hidden outright, see hidden_names)
.git/
.hg/
.eden/

# OS noise
.DS_Store
Thumbs.db
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::RelativePath;

    fn p(raw: &str) -> RelativePath {
        RelativePath::parse(raw).unwrap()
    }

    #[test]
    fn default_ignore_excludes_os_and_vcs_noise() {
        let stack = IgnoreStack::empty().push(IgnoreRuleSet::parse(
            DEFAULT_IGNORE.as_bytes(),
            RelativePath::root(),
        ));
        assert_eq!(stack.evaluate(&p(".DS_Store"), false), IgnoreOutcome::Excluded);
        assert_eq!(
            stack.evaluate(&p("project/Thumbs.db"), false),
            IgnoreOutcome::Excluded
        );
        assert_eq!(stack.evaluate(&p("readme.md"), false), IgnoreOutcome::NoOpinion);
    }
}
