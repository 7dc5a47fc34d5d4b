// ABOUTME: Version-control capability used by the push-to-redeploy fallback.
// ABOUTME: Exposes stage, commit and push; the git CLI is the production backend.

mod git;

pub use git::GitCli;

use async_trait::async_trait;
use std::path::Path;

/// Captured result of one version-control command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok() -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn failed(exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// The three operations a redeploy trigger needs.
///
/// Implementations never return errors: a command that cannot be spawned is
/// reported as an unsuccessful [`CommandOutput`] carrying the spawn error.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Stage `pathspec` relative to `cwd`.
    async fn stage(&self, cwd: &Path, pathspec: &str) -> CommandOutput;

    async fn commit(&self, cwd: &Path, message: &str) -> CommandOutput;

    async fn push(&self, cwd: &Path, remote: &str, branch: &str) -> CommandOutput;
}
