use std::process::ExitStatus;
use thiserror::Error;

/// Failures of the external media tools
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The probe succeeded but found nothing usable to classify
    #[error("no usable video stream: {0}")]
    NoVideoStream(String),

    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{tool} did not finish within {secs}s")]
    TimedOut { tool: String, secs: u64 },

    #[error("unparseable tool output: {0}")]
    InvalidOutput(String),

    #[error("invalid tool argument: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;
