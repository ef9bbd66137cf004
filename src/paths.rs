/// Platform-specific path computation
///
/// Config files follow the XDG Base Directory specification on Linux and the
/// native locations on macOS and Windows.
use std::path::{Component, Path, PathBuf};

/// Name of the per-project directory inside the platform config dir
const PROJECT_DIR: &str = "gource-log";

/// Platform-agnostic path utilities
pub struct PlatformPaths;

impl PlatformPaths {
    /// Get the appropriate config directory for the current platform
    ///
    /// - Windows: %APPDATA%
    /// - macOS: ~/Library/Application Support
    /// - Linux/Unix: $XDG_CONFIG_HOME or ~/.config
    pub fn config_dir() -> PathBuf {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get default project-specific config directory
    ///
    /// Returns: {config_dir}/gource-log
    pub fn project_config_dir() -> PathBuf {
        Self::config_dir().join(PROJECT_DIR)
    }

    /// Get default config file path
    ///
    /// Returns: {config_dir}/gource-log/config.toml
    pub fn default_config_path() -> PathBuf {
        Self::project_config_dir().join("config.toml")
    }
}

/// Render a relative path with forward slashes regardless of platform.
///
/// Returns "." for an empty path.
pub fn to_slash_path(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
