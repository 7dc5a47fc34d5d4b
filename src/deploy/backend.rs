// ABOUTME: Backend step: Render deploy status check or git push redeploy trigger.
// ABOUTME: The push fallback writes a marker file, then stages, commits and pushes.

use super::{Orchestrator, StepError, status_text};
use crate::config::Token;
use crate::diagnostics::{Diagnostics, Warning};
use crate::http::{HttpClient, HttpRequest};
use crate::poll::Clock;
use crate::vcs::{CommandOutput, VersionControl};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LatestDeploy {
    #[serde(default)]
    status: Option<serde_json::Value>,
}

impl<H, V, C> Orchestrator<H, V, C>
where
    H: HttpClient,
    V: VersionControl,
    C: Clock,
{
    /// Check the latest Render deploy, or trigger one through git without a token.
    pub async fn deploy_backend(&self, diag: &mut Diagnostics) -> bool {
        self.output.info("Starting Render backend deployment...");

        let Some(token) = self.secrets.backend_token.as_ref() else {
            self.output.warning(&format!(
                "{} not set - trying git push trigger...",
                self.config.backend.token_env
            ));
            diag.warn(Warning::push_fallback(format!(
                "{} not set, backend redeploy triggered through git",
                self.config.backend.token_env
            )));
            return self.trigger_via_push().await;
        };

        match self.latest_deploy(token).await {
            Ok(deploy) => {
                self.output.success(&format!(
                    "Render service status: {}",
                    status_text(deploy.status.as_ref(), "unknown")
                ));
                true
            }
            Err(StepError::UnexpectedStatus(status)) => {
                self.output
                    .error(&format!("Failed to check Render: {status}"));
                false
            }
            Err(e) => {
                self.output.error(&format!("Render API error: {e}"));
                false
            }
        }
    }

    async fn latest_deploy(&self, token: &Token) -> Result<LatestDeploy, StepError> {
        let request = HttpRequest::get(
            self.config.backend.latest_deploy_url(),
            self.config.request_timeout,
        )
        .bearer(token.expose());

        let response = self.http.get(&request).await?;
        if !response.is_ok() {
            return Err(StepError::UnexpectedStatus(response.status));
        }
        Ok(response.json()?)
    }

    /// Redeploy by pushing a marker change; Render rebuilds on every push to the branch.
    pub async fn trigger_via_push(&self) -> bool {
        self.output.info("Triggering Render via git push...");

        match self.push_redeploy_marker().await {
            Ok(()) => {
                self.output
                    .success("Backend push triggered - Render will redeploy");
                true
            }
            Err(e) => {
                tracing::debug!("git push trigger failed: {}", e);
                self.output
                    .error(&format!("Failed to trigger Render via git: {e}"));
                false
            }
        }
    }

    async fn push_redeploy_marker(&self) -> Result<(), StepError> {
        let backend = &self.config.backend;
        let backend_dir = self.config.backend_dir();
        let root = self.config.project_root.as_path();

        write_marker(
            &backend_dir.join(&backend.marker_file),
            &backend.marker_version,
            Utc::now(),
        )
        .await?;

        let staged = self.vcs.stage(&backend_dir, ".").await;
        if !staged.success {
            self.output.warning(&format!(
                "git add in {} failed: {}",
                backend_dir.display(),
                staged.stderr.trim()
            ));
            // A failure here shows up as an empty commit below.
            self.vcs.stage(root, &backend.marker_pathspec()).await;
        }

        let message = commit_message(Local::now().naive_local());
        require_success("git commit", self.vcs.commit(root, &message).await)?;
        require_success(
            &format!("git push {} {}", backend.remote, backend.branch),
            self.vcs.push(root, &backend.remote, &backend.branch).await,
        )?;

        Ok(())
    }
}

fn require_success(command: &str, output: CommandOutput) -> Result<(), StepError> {
    if output.success {
        Ok(())
    } else {
        Err(StepError::command_failed(command, &output.stderr))
    }
}

async fn write_marker(path: &Path, version: &str, now: DateTime<Utc>) -> Result<(), StepError> {
    tracing::debug!("writing deploy marker {}", path.display());
    tokio::fs::write(path, marker_contents(now, version)).await?;
    Ok(())
}

/// Body of the deploy marker: fractional unix timestamp and version tag.
fn marker_contents(now: DateTime<Utc>, version: &str) -> String {
    format!(
        "DEPLOY_TIMESTAMP={}.{:06}\nVERSION={}",
        now.timestamp(),
        now.timestamp_subsec_micros(),
        version
    )
}

fn commit_message(now: NaiveDateTime) -> String {
    format!("Force Render rebuild - {}", now.format("%Y-%m-%d %H:%M:%S"))
}
