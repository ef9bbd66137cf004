//! Aggregation of log entries across repositories

use super::entry::LogEntry;
use crate::error::Result;
use crate::git::{CommitInfo, GitWalker, RepositoryHandle};

/// Accumulates entries for one run; consumed by [`LogBuilder::finish`]
#[derive(Debug, Default)]
pub struct LogBuilder {
    entries: Vec<LogEntry>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one entry per file touched by `commit`
    pub fn append_commit(&mut self, commit: &CommitInfo, prefix: Option<&str>) {
        let author = commit.author_name.as_deref();
        self.entries.extend(commit.changes.iter().map(|file| {
            LogEntry::for_file(commit.author_time, author, file.change, prefix, &file.path)
        }));
    }

    /// Add the history of `branch` in `repo`; returns how many entries were added.
    ///
    /// Fails when the repository cannot be opened or has no such branch.
    pub fn append_repository(&mut self, repo: &RepositoryHandle, branch: &str) -> Result<usize> {
        tracing::info!("Repository: {}", repo.relative_path);

        let walker = GitWalker::open(&repo.path)?;
        let commits = walker.iter_commits(branch)?;

        let before = self.entries.len();
        for commit in &commits {
            self.append_commit(commit, repo.prefix());
        }
        let added = self.entries.len() - before;

        tracing::info!(
            "  {} commits, {} entries from '{}'",
            commits.len(),
            added,
            repo.relative_path
        );
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by timestamp; equal timestamps keep insertion order
    pub fn finish(mut self) -> Vec<LogEntry> {
        self.entries.sort_by_key(|entry| entry.timestamp);
        self.entries
    }
}

/// Build the sorted log of every repository's `branch` history.
pub fn build(repos: &[RepositoryHandle], branch: &str) -> Result<Vec<LogEntry>> {
    let mut builder = LogBuilder::new();
    for repo in repos {
        builder.append_repository(repo, branch)?;
    }
    Ok(builder.finish())
}
