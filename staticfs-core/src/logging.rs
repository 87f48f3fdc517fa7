use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// - Uses `RUST_LOG` for level filtering (defaults to "info" if not set)
/// - JSON output with flattened event fields when stdout is not a terminal
/// - Human-readable output on an interactive terminal
pub fn init_logging() {
    match default_log_mode() {
        LogMode::Pretty => init_pretty_logging(),
        LogMode::Json => init_json_logging(),
    }
}

pub fn init_json_logging() {
    fmt()
        .with_env_filter(env_filter())
        .json()
        .flatten_event(true)
        .init();
}

pub fn init_pretty_logging() {
    fmt().with_env_filter(env_filter()).init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn default_log_mode() -> LogMode {
    if io::stdout().is_terminal() {
        LogMode::Pretty
    } else {
        LogMode::Json
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Json,
    Pretty,
}
