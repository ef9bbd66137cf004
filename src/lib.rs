//! # gource-log - Gource custom logs for trees of git repositories
//!
//! Walks a directory for git repositories (a superproject and its checked-out
//! submodules, or any folder of clones), reads the history of one branch in
//! each, and writes a single pipe-delimited log that
//! [Gource](https://gource.io) can replay:
//!
//! ```text
//! <unix-timestamp>|<username>|<A|M|D>|<path>
//! ```
//!
//! Paths from nested repositories are prefixed with the repository's location
//! so the whole tree renders as one project. Checkouts sharing a remote URL
//! are only read once.
//!
//! ## Modules
//!
//! - [`git`]: Repository discovery, history walking and change classification
//! - [`log`]: Log entries, aggregation and serialization
//! - [`gource`]: Gource config file and launcher
//! - [`config`]: Configuration management with environment variable support
//! - [`error`]: Error types and result aliases
//! - [`paths`]: Platform paths and path normalization
//!
//! ## Usage Example
//!
//! ```no_run
//! use gource_log::{git, log};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let repos = git::discover(".")?;
//!     let entries = log::build(&repos, "master")?;
//!     log::write_log_file(Path::new("submodules.log"), &entries)?;
//!     Ok(())
//! }
//! ```

/// Configuration management with environment variable overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// Git repository discovery and history walking
pub mod git;

/// Gource config generation and launching
pub mod gource;

/// Log entries, aggregation and serialization
pub mod log;

/// Platform paths and path normalization
pub mod paths;

#[cfg(test)]
pub(crate) mod test_support;

use std::path::Path;

/// Outcome of a full discover-build-write run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub repositories: usize,
    pub entries: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Discover repositories below `root`, build the log of `branch` and write it to `output`.
pub fn generate(root: &Path, branch: &str, output: &Path) -> error::Result<RunSummary> {
    let repos = git::discover(root)?;
    let entries = log::build(&repos, branch)?;
    let summary = log::write_log_file(output, &entries)?;

    Ok(RunSummary {
        repositories: repos.len(),
        entries: entries.len(),
        written: summary.written,
        skipped: summary.skipped,
    })
}
