//! Commit history of one branch, reduced to the files each commit touched

use crate::error::{GitError, Result};
use crate::git::classify::classify_commit_file;
use crate::log::ChangeType;
use git2::{BranchType, Oid, Repository, Sort};
use std::path::{Path, PathBuf};

/// A file touched by a commit and how it was touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path inside the repository, slash separated
    pub path: String,
    pub change: ChangeType,
}

/// Information about a git commit
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// Full commit SHA hash (40 characters)
    pub hash: String,
    /// Author's name, `None` when it is not valid UTF-8
    pub author_name: Option<String>,
    /// Authoring timestamp (Unix epoch seconds)
    pub author_time: i64,
    /// Files changed relative to the first parent
    pub changes: Vec<FileChange>,
}

/// Git repository walker for extracting commit information
pub struct GitWalker {
    repo: Repository,
    repo_path: PathBuf,
}

impl GitWalker {
    /// Open the repository whose work tree is at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo_path = path.as_ref().to_path_buf();

        let repo = Repository::open(&repo_path).map_err(|e| GitError::OpenFailed {
            path: repo_path.display().to_string(),
            reason: e.message().to_string(),
        })?;

        tracing::debug!("Opened git repository at: {}", repo_path.display());

        Ok(Self { repo, repo_path })
    }

    /// Resolve the commit a local branch points at
    pub fn branch_tip(&self, branch: &str) -> Result<Oid> {
        self.repo
            .find_branch(branch, BranchType::Local)
            .ok()
            .and_then(|b| b.get().target())
            .ok_or_else(|| {
                GitError::BranchNotFound {
                    path: self.repo_path.display().to_string(),
                    branch: branch.to_string(),
                }
                .into()
            })
    }

    /// Collect every commit reachable from `branch`, newest first.
    ///
    /// Commits that cannot be read or diffed are skipped with a warning.
    pub fn iter_commits(&self, branch: &str) -> Result<Vec<CommitInfo>> {
        let tip = self.branch_tip(branch)?;
        let iter_failed = |e: git2::Error| GitError::IterFailed {
            path: self.repo_path.display().to_string(),
            reason: e.message().to_string(),
        };

        let mut revwalk = self.repo.revwalk().map_err(iter_failed)?;
        revwalk.set_sorting(Sort::TIME).map_err(iter_failed)?;
        revwalk.push(tip).map_err(iter_failed)?;

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid.map_err(iter_failed)?;

            match self.extract_commit_info(oid) {
                Ok(info) => commits.push(info),
                Err(e) => tracing::warn!("Skipping unreadable commit {}: {}", oid, e),
            }

            if commits.len() % 500 == 0 && !commits.is_empty() {
                tracing::debug!("Processed {} commits", commits.len());
            }
        }

        tracing::debug!(
            "Extracted {} commits from {}",
            commits.len(),
            self.repo_path.display()
        );
        Ok(commits)
    }

    /// Extract author data and classified changes from a commit
    fn extract_commit_info(&self, oid: Oid) -> std::result::Result<CommitInfo, git2::Error> {
        let commit = self.repo.find_commit(oid)?;
        let author = commit.author();

        let changes = self
            .changed_files(&commit)?
            .into_iter()
            .map(|path| FileChange {
                change: classify_commit_file(&commit, &path),
                path: path.to_string_lossy().into_owned(),
            })
            .collect();

        Ok(CommitInfo {
            hash: oid.to_string(),
            author_name: author.name().map(str::to_string),
            author_time: author.when().seconds(),
            changes,
        })
    }

    /// Paths changed between the first parent (or the empty tree) and the commit, as recorded
    fn changed_files(
        &self,
        commit: &git2::Commit<'_>,
    ) -> std::result::Result<Vec<PathBuf>, git2::Error> {
        let tree = commit.tree()?;

        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        // No rename detection: a rename shows up as a delete plus an add
        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let files = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(Path::to_path_buf)
            })
            .collect();

        Ok(files)
    }

}
