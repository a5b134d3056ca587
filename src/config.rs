//! Dashboard configuration.
//!
//! Defaults, overridden by `AGENTDASH_*` environment variables, then by
//! command-line flags.

use std::path::PathBuf;

use crate::client::DEFAULT_BASE_URL;
use crate::error::{DashError, DashResult};
use crate::models::{AgentRegistry, DEFAULT_AGENTS};

/// Query pre-filled in the input line.
pub const DEFAULT_QUERY: &str = "Analyze current trends in multi-agent AI systems";

/// Log filter used when neither `AGENTDASH_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "agentdash=info";

/// Settings for one dashboard session.
///
/// # Example
///
/// ```ignore
/// use agentdash::config::DashboardConfig;
///
/// let config = DashboardConfig::default()
///     .with_base_url("http://pipeline:8000")
///     .with_agents(["Planner", "Writer"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Pipeline server base URL
    pub base_url: String,
    /// Known agent names in display order
    pub agents: Vec<String>,
    /// Initial query text
    pub query: String,
    /// Explicit log file; `None` means the default location
    pub log_file: Option<PathBuf>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            agents: DEFAULT_AGENTS.iter().map(|name| name.to_string()).collect(),
            query: DEFAULT_QUERY.to_string(),
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Create a new DashboardConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pipeline server base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the known agent names.
    pub fn with_agents<I, S>(mut self, agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.agents = agents.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initial query text.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Log to this file instead of the default location.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Build config from `AGENTDASH_*` environment variables.
    ///
    /// Fails when `AGENTDASH_AGENTS` is set but names no agent, or when
    /// `AGENTDASH_URL` is not an http(s) URL.
    pub fn from_env() -> DashResult<Self> {
        let mut config = Self::default();

        if let Some(url) = non_empty_var("AGENTDASH_URL") {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(DashError::Config {
                    message: format!("AGENTDASH_URL must start with http:// or https://, got '{}'", url),
                });
            }
            config = config.with_base_url(url);
        }

        if let Ok(raw) = std::env::var("AGENTDASH_AGENTS") {
            let agents = parse_agent_list(&raw);
            if agents.is_empty() {
                return Err(DashError::Config {
                    message: "AGENTDASH_AGENTS is set but names no agent".to_string(),
                });
            }
            config = config.with_agents(agents);
        }

        if let Some(query) = non_empty_var("AGENTDASH_QUERY") {
            config = config.with_query(query);
        }

        if let Some(path) = non_empty_var("AGENTDASH_LOG_FILE") {
            config = config.with_log_file(path);
        }

        if let Some(filter) = non_empty_var("AGENTDASH_LOG").or_else(|| non_empty_var("RUST_LOG")) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Registry of the configured agents, all idle.
    pub fn registry(&self) -> AgentRegistry {
        AgentRegistry::from_names(self.agents.iter().cloned())
    }

    /// Where the TUI writes its log.
    ///
    /// Falls back to `<data_local_dir>/agentdash/agentdash.log`; `None` if no
    /// data directory can be determined.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|dir| dir.join("agentdash").join("agentdash.log"))
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Split a comma-separated agent list, dropping blanks.
fn parse_agent_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
