// ABOUTME: Git command-line implementation of the version-control capability.
// ABOUTME: Runs git as a subprocess and captures its output.

use super::{CommandOutput, VersionControl};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Shells out to a `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific executable instead of `git` from `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, cwd: &Path, args: &[&str]) -> CommandOutput {
        let command_line = format!("git {}", args.join(" "));
        tracing::debug!(cwd = %cwd.display(), "running {}", command_line);

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        match output {
            Ok(output) => {
                let result = CommandOutput {
                    success: output.status.success(),
                    exit_code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                };

                if !result.success {
                    tracing::warn!(
                        "command `{}` exited with {:?}: {}",
                        command_line,
                        result.exit_code,
                        result.stderr.trim()
                    );
                }

                result
            }
            Err(e) => {
                tracing::error!("failed to run `{}`: {}", command_line, e);
                CommandOutput::failed(None, e.to_string())
            }
        }
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn stage(&self, cwd: &Path, pathspec: &str) -> CommandOutput {
        self.run(cwd, &["add", pathspec]).await
    }

    async fn commit(&self, cwd: &Path, message: &str) -> CommandOutput {
        self.run(cwd, &["commit", "-m", message]).await
    }

    async fn push(&self, cwd: &Path, remote: &str, branch: &str) -> CommandOutput {
        self.run(cwd, &["push", remote, branch]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_reports_failure() {
        let git = GitCli::with_program("/nonexistent/mapdeploy-git");
        let result = git.stage(Path::new("."), ".").await;
        assert!(!result.success);
        assert_eq!(result.exit_code, None);
        assert!(!result.stderr.is_empty());
    }
}
