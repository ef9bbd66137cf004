//! Shared helpers for building git repositories in integration tests

#![allow(dead_code)]

use git2::build::TreeUpdateBuilder;
use git2::{FileMode, Oid, Repository, Signature, Time};
use std::path::Path;

pub const BRANCH_REF: &str = "refs/heads/master";

pub fn init_repo(path: &Path) -> Repository {
    std::fs::create_dir_all(path).unwrap();
    Repository::init(path).unwrap()
}

/// Commit `changes` (path, Some(content) to write or None to delete) on master
pub fn commit(repo: &Repository, author: &str, time: i64, changes: &[(&str, Option<&str>)]) -> Oid {
    let tip = repo.refname_to_id(BRANCH_REF).ok();
    let base = match tip {
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
    let tree = repo
        .find_tree(update.create_updated(repo, &base).unwrap())
        .unwrap();

    let sig = Signature::new(author, "dev@example.com", &Time::new(time, 0)).unwrap();
    let parents: Vec<_> = tip
        .map(|oid| repo.find_commit(oid).unwrap())
        .into_iter()
        .collect();
    let parent_refs: Vec<_> = parents.iter().collect();

    repo.commit(Some(BRANCH_REF), &sig, &sig, "commit", &tree, &parent_refs)
        .unwrap()
}

/// Split a log line into its four fields
pub fn fields(line: &str) -> Vec<&str> {
    line.splitn(4, '|').collect()
}

/// Commit on master with an author name given as raw bytes
pub fn commit_with_raw_author(
    repo: &Repository,
    author: &[u8],
    time: i64,
    path: &str,
    content: &str,
) -> Oid {
    let tip = repo.refname_to_id(BRANCH_REF).ok();
    let base = match tip {
        Some(oid) => repo.find_commit(oid).unwrap().tree().unwrap(),
        None => {
            let empty = repo.treebuilder(None).unwrap().write().unwrap();
            repo.find_tree(empty).unwrap()
        }
    };
    let blob = repo.blob(content.as_bytes()).unwrap();
    let tree = TreeUpdateBuilder::new()
        .upsert(path, blob, FileMode::Blob)
        .create_updated(repo, &base)
        .unwrap();

    let mut raw = format!("tree {}\n", tree).into_bytes();
    if let Some(parent) = tip {
        raw.extend_from_slice(format!("parent {}\n", parent).as_bytes());
    }
    raw.extend_from_slice(b"author ");
    raw.extend_from_slice(author);
    raw.extend_from_slice(format!(" <dev@example.com> {} +0000\n", time).as_bytes());
    raw.extend_from_slice(
        format!("committer Build <build@example.com> {} +0000\n\ncommit\n", time).as_bytes(),
    );

    let oid = repo
        .odb()
        .unwrap()
        .write(git2::ObjectType::Commit, &raw)
        .unwrap();
    repo.reference(BRANCH_REF, oid, true, "raw commit").unwrap();
    oid
}
