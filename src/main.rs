use anyhow::{Context, Result};
use clap::Parser;
use gource_log::config::Config;
use gource_log::gource;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Generate a Gource custom log from every git repository below a directory
#[derive(Debug, Parser)]
#[command(name = "gource-log", version, long_version = LONG_VERSION)]
struct Cli {
    /// Log file to write [default: submodules.log]
    output: Option<PathBuf>,

    /// Directory to scan for repositories [default: current directory]
    #[arg(long)]
    root: Option<PathBuf>,

    /// Branch to read in every repository [default: master]
    #[arg(long)]
    branch: Option<String>,

    /// Configuration file to load instead of the default location
    #[arg(long, env = "GOURCE_LOG_CONFIG")]
    config: Option<PathBuf>,

    /// Also write a Gource config file pointing at the log
    #[arg(long)]
    gource_config: Option<PathBuf>,

    /// Launch gource once the log is written (requires a Gource config file)
    #[arg(long)]
    launch: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// CLI arguments take priority over every other source
    fn apply_to(self, config: &mut Config) {
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(root) = self.root {
            config.root = Some(root);
        }
        if let Some(branch) = self.branch {
            config.branch = branch;
        }
        if let Some(path) = self.gource_config {
            config.gource.config_path = Some(path);
        }
        if self.launch {
            config.gource.launch = true;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;

    let root = match &config.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let summary = gource_log::generate(&root, &config.branch, &config.output)
        .with_context(|| format!("Failed to generate log for {}", root.display()))?;

    tracing::info!(
        "Done: {} repositories, {} entries written, {} skipped",
        summary.repositories,
        summary.written,
        summary.skipped
    );

    if let Some(config_path) = &config.gource.config_path {
        gource::write_config(config_path, &config.output)?;

        if config.gource.launch {
            gource::launch(config_path, config.gource.seconds_per_day)?;
        }
    }

    Ok(())
}
