// ABOUTME: Error types for individual deployment steps.
// ABOUTME: Steps convert these into outcomes; they never escape a run.

use crate::http::HttpError;

/// Errors that can occur inside a deployment step.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// Transport-level failure (timeout, connection refused, TLS).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The endpoint answered with something other than 200.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// The 200 response body was not the expected JSON document.
    #[error("invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// Local file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A version-control command exited unsuccessfully.
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
}

impl StepError {
    pub(crate) fn command_failed(command: impl Into<String>, stderr: &str) -> Self {
        let stderr = stderr.trim();
        StepError::CommandFailed {
            command: command.into(),
            stderr: if stderr.is_empty() {
                "no output".to_string()
            } else {
                stderr.to_string()
            },
        }
    }
}
