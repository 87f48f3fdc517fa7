mod check;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use staticfs_core::config::StaticfsConfig;
use staticfs_core::logging::init_logging;

const DEFAULT_CONFIG: &str = "config/staticfs.toml";

#[derive(Parser, Debug)]
#[command(
    name = "staticfs",
    version,
    about = "staticfs: Pingora-based static file server"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the file server (default)
    Run {
        /// Path to the staticfs config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: String,
    },

    /// Validate configuration and exit
    Check {
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Check { config }) => check::check(&config),

        Some(Command::Run { config }) => run(&config),

        None => run(DEFAULT_CONFIG),
    }
}

fn run(path: &str) -> Result<()> {
    init_logging();

    let cfg = StaticfsConfig::from_file(path)
        .with_context(|| format!("failed to load staticfs config from {path}"))?;

    staticfs::run(cfg)
}
