//! Helpers for building throwaway git repositories in unit tests

use git2::build::TreeUpdateBuilder;
use git2::{FileMode, Oid, Repository, Signature, Time};
use std::path::Path;

pub(crate) const BRANCH_REF: &str = "refs/heads/master";

/// Raw commits are committed this long after they were authored
pub(crate) const COMMITTER_DELAY: i64 = 86_400;

pub(crate) fn init_repo(path: &Path) -> Repository {
    std::fs::create_dir_all(path).unwrap();
    Repository::init(path).unwrap()
}

fn branch_tip(repo: &Repository) -> Option<Oid> {
    repo.refname_to_id(BRANCH_REF).ok()
}

fn updated_tree(repo: &Repository, changes: &[(&Path, Option<&str>)]) -> Oid {
    let base = match branch_tip(repo) {
        Some(oid) => repo.find_commit(oid).unwrap().tree().unwrap(),
        None => {
            let empty = repo.treebuilder(None).unwrap().write().unwrap();
            repo.find_tree(empty).unwrap()
        }
    };

    let mut update = TreeUpdateBuilder::new();
    for (path, content) in changes {
        match content {
            Some(content) => {
                let blob = repo.blob(content.as_bytes()).unwrap();
                update.upsert(*path, blob, FileMode::Blob);
            }
            None => {
                update.remove(*path);
            }
        }
    }
    update.create_updated(repo, &base).unwrap()
}

/// Commit `changes` (path, Some(content) to write or None to delete) on master.
pub(crate) fn commit_files(
    repo: &Repository,
    author: &str,
    time: i64,
    changes: &[(&str, Option<&str>)],
) -> Oid {
    let changes: Vec<(&Path, Option<&str>)> = changes
        .iter()
        .map(|(path, content)| (Path::new(*path), *content))
        .collect();
    commit_paths(repo, author, time, &changes)
}

/// Like [`commit_files`] for paths that need not be valid UTF-8.
pub(crate) fn commit_paths(
    repo: &Repository,
    author: &str,
    time: i64,
    changes: &[(&Path, Option<&str>)],
) -> Oid {
    let tree = repo.find_tree(updated_tree(repo, changes)).unwrap();
    let sig = Signature::new(author, "dev@example.com", &Time::new(time, 0)).unwrap();
    let parents: Vec<_> = branch_tip(repo)
        .map(|oid| repo.find_commit(oid).unwrap())
        .into_iter()
        .collect();
    let parent_refs: Vec<_> = parents.iter().collect();

    repo.commit(
        Some(BRANCH_REF),
        &sig,
        &sig,
        "test commit",
        &tree,
        &parent_refs,
    )
    .unwrap()
}

/// Commit with a raw author name that need not be valid UTF-8.
///
/// The committer time is `time + COMMITTER_DELAY`.
pub(crate) fn commit_with_raw_author(
    repo: &Repository,
    author: &[u8],
    time: i64,
    changes: &[(&str, Option<&str>)],
) -> Oid {
    let changes: Vec<(&Path, Option<&str>)> = changes
        .iter()
        .map(|(path, content)| (Path::new(*path), *content))
        .collect();
    let tree = updated_tree(repo, &changes);
    write_raw_commit(repo, tree, author, time)
}

/// Commit pointing at a tree object that does not exist.
pub(crate) fn commit_with_missing_tree(repo: &Repository, time: i64) -> Oid {
    let missing = Oid::from_str("1234567890abcdef1234567890abcdef12345678").unwrap();
    write_raw_commit(repo, missing, b"Mallory", time)
}

fn write_raw_commit(repo: &Repository, tree: Oid, author: &[u8], time: i64) -> Oid {
    let mut raw = format!("tree {}\n", tree).into_bytes();
    if let Some(parent) = branch_tip(repo) {
        raw.extend_from_slice(format!("parent {}\n", parent).as_bytes());
    }
    raw.extend_from_slice(b"author ");
    raw.extend_from_slice(author);
    raw.extend_from_slice(format!(" <dev@example.com> {} +0000\n", time).as_bytes());
    raw.extend_from_slice(
        format!(
            "committer Build <build@example.com> {} +0000\n\nraw commit\n",
            time + COMMITTER_DELAY
        )
        .as_bytes(),
    );

    let oid = repo
        .odb()
        .unwrap()
        .write(git2::ObjectType::Commit, &raw)
        .unwrap();
    repo.reference(BRANCH_REF, oid, true, "raw commit").unwrap();
    oid
}
