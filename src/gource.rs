//! Gource follow-on: config file generation and launching the visualizer

use crate::error::{GourceError, Result};
use std::path::Path;
use std::process::Command;

/// Name of the visualizer binary looked up on `PATH`
pub const GOURCE_BINARY: &str = "gource";

/// Contents of a Gource config file pointing at `log_path`
pub fn config_contents(log_path: &Path) -> String {
    format!("[gource]\n  path={}\n", log_path.display())
}

/// Write a Gource config file that loads `log_path`
pub fn write_config(config_path: &Path, log_path: &Path) -> Result<()> {
    std::fs::write(config_path, config_contents(log_path)).map_err(|e| {
        GourceError::ConfigWriteFailed {
            path: config_path.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    tracing::info!("Wrote Gource config to {}", config_path.display());
    Ok(())
}

/// Command line used to launch gource on `config_path`
pub fn launch_command(config_path: &Path, seconds_per_day: f64) -> Command {
    let mut command = Command::new(GOURCE_BINARY);
    command
        .arg("--load-config")
        .arg(config_path)
        .arg("-s")
        .arg(seconds_per_day.to_string());
    command
}

/// Run gource on `config_path` and wait for it to exit
pub fn launch(config_path: &Path, seconds_per_day: f64) -> Result<()> {
    tracing::info!("Launching {} with {}", GOURCE_BINARY, config_path.display());

    let status = launch_command(config_path, seconds_per_day)
        .status()
        .map_err(|e| GourceError::LaunchFailed(e.to_string()))?;

    if !status.success() {
        return Err(GourceError::NonZeroExit(status.code().unwrap_or(-1)).into());
    }
    Ok(())
}
