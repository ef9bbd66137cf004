//! Change-type classification of a file touched by a commit

use crate::log::ChangeType;
use git2::{Commit, ErrorCode, Tree};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt::Display;
use std::path::Path;

/// The full set of paths recorded in one snapshot
pub trait TreeListing {
    type Error: Display;

    /// Whether `path` (file or directory, relative to the snapshot root) exists
    fn contains_path(&self, path: &Path) -> Result<bool, Self::Error>;
}

impl TreeListing for Tree<'_> {
    type Error = git2::Error;

    fn contains_path(&self, path: &Path) -> Result<bool, git2::Error> {
        match self.get_path(path) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl TreeListing for BTreeSet<&str> {
    type Error = Infallible;

    fn contains_path(&self, path: &Path) -> Result<bool, Infallible> {
        Ok(path.to_str().is_some_and(|p| self.contains(p)))
    }
}

/// Classify `path` given the first parent's snapshot (if any) and the commit's own.
///
/// 1. no parent: Added
/// 2. missing from the parent: Added
/// 3. missing from the commit: Deleted
/// 4. otherwise: Modified
pub fn classify<T: TreeListing>(
    parent: Option<&T>,
    tree: &T,
    path: &Path,
) -> Result<ChangeType, T::Error> {
    let Some(parent) = parent else {
        return Ok(ChangeType::Added);
    };

    if !parent.contains_path(path)? {
        Ok(ChangeType::Added)
    } else if !tree.contains_path(path)? {
        Ok(ChangeType::Deleted)
    } else {
        Ok(ChangeType::Modified)
    }
}

/// Like [`classify`], but any lookup failure yields [`ChangeType::Modified`].
pub fn classify_or_modified<T: TreeListing>(
    parent: Option<&T>,
    tree: &T,
    path: &Path,
) -> ChangeType {
    classify(parent, tree, path).unwrap_or_else(|e| {
        tracing::debug!(
            "Classification of {:?} failed, assuming modified: {}",
            path,
            e
        );
        ChangeType::Modified
    })
}

/// Classify a file changed by a git commit against its first parent.
///
/// `path` is the raw path from the diff, so non UTF-8 names are looked up as recorded.
pub fn classify_commit_file(commit: &Commit<'_>, path: &Path) -> ChangeType {
    try_classify_commit_file(commit, path).unwrap_or_else(|e| {
        tracing::debug!(
            "Classification of {:?} in {} failed, assuming modified: {}",
            path,
            commit.id(),
            e
        );
        ChangeType::Modified
    })
}

fn try_classify_commit_file(commit: &Commit<'_>, path: &Path) -> Result<ChangeType, git2::Error> {
    if commit.parent_count() == 0 {
        return Ok(ChangeType::Added);
    }

    let parent_tree = commit.parent(0)?.tree()?;
    let tree = commit.tree()?;
    classify(Some(&parent_tree), &tree, path)
}
