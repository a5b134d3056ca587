//! CLI module for agentdash.
//!
//! - Argument parsing
//! - Version display
//! - Headless runs and result retrieval
//!
//! # Usage
//!
//! ```ignore
//! use agentdash::cli::{parse_args, run_cli_command};
//!
//! let args = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(&args.command, &config) {
//!     // CLI command was executed, exit with result
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
pub mod fetch;
pub mod headless;
pub mod report_text;
pub mod version;

pub use args::{parse_args, CliArgs, CliCommand, USAGE};
pub use headless::run_headless;
pub use version::{version_string, VERSION};

use std::sync::Arc;

use crate::client::PipelineClient;
use crate::config::DashboardConfig;
use crate::error::{DashError, DashResult};

/// Run a CLI command if applicable.
///
/// # Returns
///
/// * `None` - If the command is `RunTui` (no CLI action needed)
/// * `Some(Ok(()))` - If a CLI command executed successfully
/// * `Some(Err(e))` - If a CLI command failed
pub fn run_cli_command(command: &CliCommand, config: &DashboardConfig) -> Option<DashResult<()>> {
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            Some(Ok(()))
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Invalid(message) => Some(Err(DashError::Config {
            message: format!("{}\n\n{}", message, USAGE),
        })),
        CliCommand::Headless { query } => {
            let query = query.clone().unwrap_or_else(|| config.query.clone());
            Some(block_on(async {
                let client = PipelineClient::with_base_url(config.base_url.clone());
                let mut stdout = std::io::stdout();
                run_headless(Arc::new(client), config.registry(), &query, &mut stdout)
                    .await
                    .map(|_| ())
            }))
        }
        CliCommand::FetchResult { run_id } => Some(block_on(async {
            let client = PipelineClient::with_base_url(config.base_url.clone());
            let mut stdout = std::io::stdout();
            fetch::print_result(&client, run_id, &mut stdout)
                .await
                .map(|_| ())
        })),
        CliCommand::RunTui => None,
    }
}

fn block_on<F>(future: F) -> DashResult<()>
where
    F: std::future::Future<Output = DashResult<()>>,
{
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tui_returns_none() {
        let result = run_cli_command(&CliCommand::RunTui, &DashboardConfig::default());
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_returns_config_error() {
        let result = run_cli_command(
            &CliCommand::Invalid("--url requires a value".to_string()),
            &DashboardConfig::default(),
        );
        assert!(matches!(result, Some(Err(DashError::Config { .. }))));
    }

    #[test]
    fn test_headless_against_unreachable_server_fails() {
        let config = DashboardConfig::default().with_base_url("http://127.0.0.1:1");
        let result = run_cli_command(
            &CliCommand::Headless {
                query: Some("q".to_string()),
            },
            &config,
        );
        assert!(matches!(result, Some(Err(DashError::RunFailed { .. }))));
    }
}
