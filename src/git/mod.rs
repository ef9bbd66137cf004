//! Git repository operations: discovery, history walking and change classification

/// Change-type classification against the first parent
pub mod classify;
/// Repository discovery and remote-based deduplication
pub mod discover;
/// Git history walking and commit extraction
pub mod walker;

pub use classify::{TreeListing, classify, classify_commit_file, classify_or_modified};
pub use discover::{RepositoryHandle, discover};
pub use walker::{CommitInfo, FileChange, GitWalker};
