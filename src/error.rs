/// Centralized error types for gource-log using thiserror
///
/// Only failures that prevent opening a required resource surface here.
/// Per-commit and per-entry problems are handled where they occur.
use thiserror::Error;

/// Convenience alias used across the library
pub type Result<T, E = GourceLogError> = std::result::Result<T, E>;

/// Main error type for gource-log
#[derive(Error, Debug)]
pub enum GourceLogError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gource error: {0}")]
    Gource(#[from] GourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to repository discovery
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Root directory does not exist: {0}")]
    RootNotFound(String),

    #[error("Root path is not a directory: {0}")]
    NotADirectory(String),
}

/// Errors related to git operations
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open git repository '{path}': {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("Branch '{branch}' not found in '{path}'")]
    BranchNotFound { path: String, branch: String },

    #[error("Failed to iterate commits of '{path}': {reason}")]
    IterFailed { path: String, reason: String },
}

/// Errors related to writing the log file
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create log file '{path}': {reason}")]
    CreateFailed { path: String, reason: String },

    #[error("Failed to flush log file '{path}': {reason}")]
    FlushFailed { path: String, reason: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// Errors related to the Gource follow-on step
#[derive(Error, Debug)]
pub enum GourceError {
    #[error("Failed to write Gource config '{path}': {reason}")]
    ConfigWriteFailed { path: String, reason: String },

    #[error("Failed to launch gource: {0}")]
    LaunchFailed(String),

    #[error("gource exited with status {0}")]
    NonZeroExit(i32),
}
