/// Configuration system for gource-log
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::error::{ConfigError, GourceLogError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log file to write
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Branch whose history is read in every repository
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Directory to scan; the current directory when unset
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Gource follow-on configuration
    #[serde(default)]
    pub gource: GourceConfig,
}

/// Gource follow-on configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GourceConfig {
    /// Where to write the Gource config file; nothing is written when unset
    #[serde(default)]
    pub config_path: Option<PathBuf>,

    /// Launch gource on the generated config once the log is written
    #[serde(default)]
    pub launch: bool,

    /// Value passed to `gource -s`
    #[serde(default = "default_seconds_per_day")]
    pub seconds_per_day: f64,
}

fn default_output() -> PathBuf {
    PathBuf::from("submodules.log")
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_seconds_per_day() -> f64 {
    0.01
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            branch: default_branch(),
            root: None,
            gource: GourceConfig::default(),
        }
    }
}

impl Default for GourceConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            launch: false,
            seconds_per_day: default_seconds_per_day(),
        }
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// Values are not validated here; later sources may still override them.
    pub fn from_file(path: &Path) -> Result<Self, GourceLogError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, GourceLogError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), GourceLogError> {
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if self.branch.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "branch".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        let seconds_per_day = self.gource.seconds_per_day;
        if seconds_per_day.is_nan() || seconds_per_day <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "gource.seconds_per_day".to_string(),
                reason: format!("must be greater than 0, got {}", seconds_per_day),
            }
            .into());
        }

        if self.gource.launch && self.gource.config_path.is_none() {
            return Err(ConfigError::InvalidValue {
                key: "gource.launch".to_string(),
                reason: "requires gource.config_path to be set".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(output) = lookup("GOURCE_LOG_OUTPUT") {
            self.output = PathBuf::from(output);
        }

        if let Some(branch) = lookup("GOURCE_LOG_BRANCH") {
            self.branch = branch;
        }

        if let Some(root) = lookup("GOURCE_LOG_ROOT") {
            self.root = Some(PathBuf::from(root));
        }

        if let Some(path) = lookup("GOURCE_LOG_GOURCE_CONFIG") {
            self.gource.config_path = Some(PathBuf::from(path));
        }
    }

    /// Load from an explicit file (or the default location) and apply environment overrides.
    ///
    /// Call [`Config::validate`] once command-line overrides are applied.
    pub fn load(path: Option<&Path>) -> Result<Self, GourceLogError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::load_or_default()?,
        };
        config.apply_env_overrides();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output, PathBuf::from("submodules.log"));
        assert_eq!(config.branch, "master");
        assert!(config.root.is_none());
        assert!(config.gource.config_path.is_none());
        assert!(!config.gource.launch);
        assert_eq!(config.gource.seconds_per_day, 0.01);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_branch() {
        let mut config = Config::default();
        config.branch = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("branch"));
    }

    #[test]
    fn test_validate_empty_output() {
        let mut config = Config::default();
        config.output = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_seconds_per_day() {
        let mut config = Config::default();
        config.gource.seconds_per_day = 0.0;
        assert!(config.validate().is_err());

        config.gource.seconds_per_day = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_launch_requires_config_path() {
        let mut config = Config::default();
        config.gource.launch = true;
        assert!(config.validate().is_err());

        config.gource.config_path = Some(PathBuf::from("gource.conf"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "branch = \"main\"").unwrap();
        writeln!(file, "[gource]").unwrap();
        writeln!(file, "config_path = \"gource.conf\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.branch, "main");
        assert_eq!(config.output, PathBuf::from("submodules.log"));
        assert_eq!(
            config.gource.config_path,
            Some(PathBuf::from("gource.conf"))
        );
        assert_eq!(config.gource.seconds_per_day, 0.01);
    }

    #[test]
    fn test_from_file_defers_validation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[gource]").unwrap();
        writeln!(file, "launch = true").unwrap();

        let mut config = Config::load(Some(file.path())).unwrap();
        assert!(config.gource.launch);
        assert!(config.validate().is_err());

        config.gource.config_path = Some(PathBuf::from("gource.conf"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "branch = ").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file(Path::new("/nonexistent/gource-log.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GOURCE_LOG_OUTPUT", "all.log"),
            ("GOURCE_LOG_BRANCH", "main"),
            ("GOURCE_LOG_ROOT", "/srv/code"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.output, PathBuf::from("all.log"));
        assert_eq!(config.branch, "main");
        assert_eq!(config.root, Some(PathBuf::from("/srv/code")));
        assert!(config.gource.config_path.is_none());
    }

    #[test]
    fn test_serialize_roundtrip_through_toml() {
        let mut config = Config::default();
        config.gource.config_path = Some(PathBuf::from("gource.conf"));
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.gource.config_path, config.gource.config_path);
        assert_eq!(parsed.branch, config.branch);
    }
}
