//! `tracing` subscriber setup.
//!
//! The TUI owns stdout, so it logs to a file; headless runs log to stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{DashboardConfig, DEFAULT_LOG_FILTER};
use crate::error::DashResult;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Off,
}

impl LogTarget {
    /// File logging at the configured path, or nothing if there is no usable path.
    pub fn for_tui(config: &DashboardConfig) -> Self {
        config.log_path().map(LogTarget::File).unwrap_or(LogTarget::Off)
    }
}

fn env_filter(config: &DashboardConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber. Calling it twice keeps the first one.
pub fn init_logging(config: &DashboardConfig, target: &LogTarget) -> DashResult<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match target {
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init();
        }
        LogTarget::Stderr => {
            let _ = registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init();
        }
        LogTarget::Off => {
            let _ = registry.with(fmt::layer().with_writer(std::io::sink)).try_init();
        }
    }

    Ok(())
}
