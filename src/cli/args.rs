//! Command-line argument parsing for agentdash.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run one pipeline without the terminal UI; `None` uses the configured query
    Headless { query: Option<String> },
    /// Print the stored result of a run
    FetchResult { run_id: String },
    /// Run the TUI application (default)
    RunTui,
    /// Arguments could not be understood
    Invalid(String),
}

/// Parsed command plus flags that apply to every command.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: CliCommand,
    /// `--url` override for the pipeline server
    pub base_url: Option<String>,
}

pub const USAGE: &str = "\
Usage: agentdash [--url <base>] [--headless [query...] | --result <run_id>]

Options:
  --url <base>         Pipeline server base URL (default from AGENTDASH_URL)
  --headless [query]   Run one pipeline and print events and the report
  --result <run_id>    Print the stored result of a run
  -V, --version        Show version
  -h, --help           Show this help";

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use agentdash::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["agentdash".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: Iterator<Item = String>,
{
    let mut command = CliCommand::RunTui;
    let mut base_url = None;
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                command = CliCommand::Version;
                break;
            }
            "--help" | "-h" => {
                command = CliCommand::Help;
                break;
            }
            "--url" => match args.next() {
                Some(url) => base_url = Some(url),
                None => {
                    command = CliCommand::Invalid("--url requires a value".to_string());
                    break;
                }
            },
            "--result" => match args.next() {
                Some(run_id) => command = CliCommand::FetchResult { run_id },
                None => {
                    command = CliCommand::Invalid("--result requires a run id".to_string());
                    break;
                }
            },
            "--headless" => {
                // Everything after --headless that isn't a flag is the query
                let mut words = Vec::new();
                let mut trailing = Vec::new();
                for word in args.by_ref() {
                    if word.starts_with("--") || !trailing.is_empty() {
                        trailing.push(word);
                    } else {
                        words.push(word);
                    }
                }
                let query = if words.is_empty() {
                    None
                } else {
                    Some(words.join(" "))
                };
                command = CliCommand::Headless { query };
                // Allow `--headless query --url x`
                let mut rest = trailing.into_iter();
                while let Some(flag) = rest.next() {
                    if flag == "--url" {
                        base_url = rest.next();
                    }
                }
                break;
            }
            _ => {}
        }
    }

    CliArgs { command, base_url }
}
