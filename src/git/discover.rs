//! Repository discovery: find every git repository below a root directory

use crate::error::{DiscoveryError, Result};
use crate::paths::to_slash_path;
use git2::Repository;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the metadata directory that marks a repository root
pub const METADATA_DIR: &str = ".git";

/// Remote consulted first when resolving a repository's URL
const DEFAULT_REMOTE: &str = "origin";

/// A repository found during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    /// Location of the repository work tree, usable to open it
    pub path: PathBuf,
    /// Path relative to the discovery root with forward slashes ("." for the root itself)
    pub relative_path: String,
    /// Remote URL, used only to skip duplicate checkouts
    pub remote_url: Option<String>,
}

impl RepositoryHandle {
    pub fn new(
        path: impl Into<PathBuf>,
        relative_path: impl Into<String>,
        remote_url: Option<String>,
    ) -> Self {
        Self {
            path: path.into(),
            relative_path: relative_path.into(),
            remote_url,
        }
    }

    /// Prefix prepended to file paths of this repository, `None` for the root repository
    pub fn prefix(&self) -> Option<&str> {
        if self.relative_path == "." || self.relative_path.is_empty() {
            None
        } else {
            Some(&self.relative_path)
        }
    }
}

/// Discover repositories below `root`, dropping checkouts whose remote was already seen.
///
/// Order is depth-first traversal order with siblings sorted by name.
pub fn discover(root: impl AsRef<Path>) -> Result<Vec<RepositoryHandle>> {
    let root = root.as_ref();

    let candidates = find_repository_roots(root)?
        .into_iter()
        .map(|path| {
            let relative_path = to_slash_path(path.strip_prefix(root).unwrap_or(path.as_path()));
            tracing::info!("Found repository at '{}'", relative_path);

            let remote_url = resolve_remote_url(&path);
            if let Some(url) = &remote_url {
                tracing::info!("  {}", url);
            }

            RepositoryHandle::new(path, relative_path, remote_url)
        })
        .collect();

    let repos = dedup_by_remote(candidates);
    tracing::info!("Discovered {} repositories", repos.len());
    Ok(repos)
}

/// List every directory below `root` (inclusive) that contains a `.git` directory.
pub fn find_repository_roots(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(DiscoveryError::RootNotFound(root.display().to_string()).into());
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.display().to_string()).into());
    }

    let mut roots = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        // Never descend into repository metadata
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == METADATA_DIR));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        if entry.path().join(METADATA_DIR).is_dir() {
            roots.push(entry.path().to_path_buf());
        }
    }

    Ok(roots)
}

/// Resolve the URL of the repository's upstream remote.
///
/// Prefers `origin`; otherwise uses the only configured remote. Any failure
/// means the repository is treated as local-only.
pub fn resolve_remote_url(path: &Path) -> Option<String> {
    let repo = match Repository::open(path) {
        Ok(repo) => repo,
        Err(e) => {
            tracing::debug!("Cannot open {:?} to resolve remote: {}", path, e);
            return None;
        }
    };

    let remote = match repo.find_remote(DEFAULT_REMOTE) {
        Ok(remote) => remote,
        Err(_) => {
            let names = repo.remotes().ok()?;
            if names.len() != 1 {
                return None;
            }
            repo.find_remote(names.get(0)?).ok()?
        }
    };

    remote.url().map(str::to_string)
}

/// Keep the first repository seen for each remote URL.
///
/// Repositories without a remote are never considered duplicates.
pub fn dedup_by_remote(candidates: Vec<RepositoryHandle>) -> Vec<RepositoryHandle> {
    let mut seen = HashSet::new();

    candidates
        .into_iter()
        .filter(|repo| match &repo.remote_url {
            Some(url) if !seen.insert(url.clone()) => {
                tracing::debug!(
                    "Skipping '{}': remote {} already collected",
                    repo.relative_path,
                    url
                );
                false
            }
            _ => true,
        })
        .collect()
}
