//! Parsing and matching for one gitignore-style rule file.
//!
//! Syntax follows `.gitignore` conventions: `#` comments and blank lines are
//! skipped; a leading `!` negates a rule; a trailing `/` restricts it to
//! directories; a leading `/` (or any `/` before the final character)
//! anchors the pattern to the file's own scope root, otherwise the pattern
//! matches at any depth below that root.

use globset::{Glob, GlobMatcher};

use crate::path::RelativePath;

/// The result of evaluating a path against an ignore rule (set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreOutcome {
    /// Explicitly re-included by a negated rule.
    Included,
    /// Matched an active (non-negated) rule.
    Excluded,
    /// No rule spoke to this path.
    NoOpinion,
}

#[derive(Debug, Clone)]
struct IgnoreRule {
    matcher: GlobMatcher,
    negated: bool,
    dir_only: bool,
}

impl IgnoreRule {
    fn compile(line: &str) -> Option<Self> {
        let mut pattern = line;

        let negated = pattern.starts_with('!');
        if negated {
            pattern = &pattern[1..];
        }

        let dir_only = pattern.ends_with('/');
        if dir_only {
            pattern = &pattern[..pattern.len() - 1];
        }

        let anchored = pattern.starts_with('/');
        let stripped = pattern.strip_prefix('/').unwrap_or(pattern);
        let glob_pattern = if anchored || stripped.contains('/') {
            stripped.to_string()
        } else {
            format!("**/{stripped}")
        };

        let glob = Glob::new(&glob_pattern).ok()?;
        Some(Self {
            matcher: glob.compile_matcher(),
            negated,
            dir_only,
        })
    }

    fn matches(&self, relative: &RelativePath, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        self.matcher.is_match(relative.to_string())
    }
}

/// All rules parsed from one ignore file, tagged with the directory it
/// governs (its *scope root*).
#[derive(Debug, Clone)]
pub struct IgnoreRuleSet {
    rules: Vec<IgnoreRule>,
    scope_root: RelativePath,
}

impl IgnoreRuleSet {
    /// Parse rule lines from the raw bytes of an ignore file declared at
    /// `scope_root`.
    pub fn parse(content: &[u8], scope_root: RelativePath) -> Self {
        let text = String::from_utf8_lossy(content);
        let rules = text
            .lines()
            .filter_map(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return None;
                }
                IgnoreRule::compile(trimmed)
            })
            .collect();
        Self { rules, scope_root }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn scope_root(&self) -> &RelativePath {
        &self.scope_root
    }

    /// Evaluate this one file's rules against `path`. Scans last-declared
    /// to first-declared, matching gitignore's "last match wins within one
    /// file" convention, and returns as soon as a rule matches.
    ///
    /// Returns `None` (not `NoOpinion`) when `path` doesn't even lie under
    /// this file's scope root, or no rule here matches it — either way, the
    /// caller should keep walking outward.
    pub(crate) fn match_one(&self, path: &RelativePath, is_dir: bool) -> Option<IgnoreOutcome> {
        let relative = path.strip_prefix(&self.scope_root)?;
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(&relative, is_dir))
            .map(|rule| {
                if rule.negated {
                    IgnoreOutcome::Included
                } else {
                    IgnoreOutcome::Excluded
                }
            })
    }
}
