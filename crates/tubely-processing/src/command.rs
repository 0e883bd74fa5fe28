//! Bounded execution of external media tools.

use crate::error::{ProcessingError, ProcessingResult};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

const MAX_STDERR_CHARS: usize = 2048;

/// Reject arguments carrying shell metacharacters or traversal sequences.
///
/// Tools are never run through a shell, so this only guards against surprising
/// paths reaching ffmpeg/ffprobe from configuration.
pub fn validate_path(path: &Path) -> ProcessingResult<()> {
    let s = path.to_string_lossy();
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if s.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(ProcessingError::InvalidPath(format!(
            "path contains dangerous characters: {}",
            s
        )));
    }
    if s.contains("..") {
        return Err(ProcessingError::InvalidPath(format!(
            "path contains directory traversal: {}",
            s
        )));
    }
    Ok(())
}

/// Run `program` with `args`, capturing output, and fail unless it exits zero in time.
///
/// The child is killed when the deadline elapses.
pub async fn run_tool<I, S>(program: &str, args: I, timeout: Duration) -> ProcessingResult<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = tool_name(program);
    let start = std::time::Instant::now();

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ProcessingError::Spawn {
            tool: tool.clone(),
            source,
        })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => {
            tracing::warn!(tool = %tool, timeout_secs = timeout.as_secs(), "Media tool timed out");
            return Err(ProcessingError::TimedOut {
                tool,
                secs: timeout.as_secs(),
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr: String = stderr.trim().chars().take(MAX_STDERR_CHARS).collect();
        return Err(ProcessingError::ToolFailed {
            tool,
            status: output.status,
            stderr,
        });
    }

    tracing::debug!(
        tool = %tool,
        duration_ms = start.elapsed().as_millis(),
        "Media tool finished"
    );

    Ok(output)
}

fn tool_name(program: &str) -> String {
    Path::new(program)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string())
}
