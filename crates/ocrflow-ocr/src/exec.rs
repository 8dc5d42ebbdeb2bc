//! Shared shell-tool invocation for processors

use std::process::Output;

use anyhow::anyhow;
use tokio::process::Command;

use crate::processor::ProcessError;

/// Run a tool to completion, capturing stdout/stderr.
pub(crate) async fn run_tool(tool: &str, command: &mut Command) -> Result<Output, ProcessError> {
    command
        .output()
        .await
        .map_err(|e| ProcessError::Failed(anyhow!("cannot run {}: {}", tool, e)))
}

/// Map a non-zero exit status to a ProcessError.
///
/// Stderr matching one of `unusable_markers` means the tool rejected the
/// input, not that the tool is broken.
pub(crate) fn check_tool_failure(
    tool: &str,
    output: &Output,
    unusable_markers: &[&str],
) -> Result<(), ProcessError> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if unusable_markers.iter().any(|marker| stderr.contains(marker)) {
        return Err(ProcessError::UnusableInput(format!(
            "{} rejected the input: {}",
            tool,
            stderr.trim()
        )));
    }

    Err(ProcessError::Failed(anyhow!(
        "{} exited with {}: {}",
        tool,
        output.status,
        stderr.trim()
    )))
}
