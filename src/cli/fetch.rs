//! `--result`: print the stored result of a run.

use std::io::Write;

use super::report_text::report_text;
use crate::client::{PipelineClient, RunResult};
use crate::error::DashResult;

/// Fetch and print the result of `run_id`. A pending run is not an error.
pub async fn print_result<W: Write>(
    client: &PipelineClient,
    run_id: &str,
    out: &mut W,
) -> DashResult<RunResult> {
    let result = client.fetch_result(run_id).await?;
    match &result {
        RunResult::Ready(report) => write!(out, "{}", report_text(report))?,
        RunResult::Pending => writeln!(out, "Run {} is still in progress.", run_id)?,
    }
    Ok(result)
}
