// ABOUTME: Health step: probe the backend health endpoint with bounded retries.
// ABOUTME: A single probe never fails the run; the poll records the last result.

use super::{Orchestrator, StepError, status_text};
use crate::diagnostics::{Diagnostics, Warning};
use crate::http::{HttpClient, HttpRequest};
use crate::poll::{Clock, poll_until};
use crate::vcs::VersionControl;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct HealthReport {
    #[serde(default)]
    status: Option<serde_json::Value>,
}

impl<H, V, C> Orchestrator<H, V, C>
where
    H: HttpClient,
    V: VersionControl,
    C: Clock,
{
    /// One health probe. True only for a 200 with a JSON body.
    pub async fn poll_backend_health(&self) -> bool {
        self.output.info("Checking backend health...");

        match self.fetch_health().await {
            Ok(report) => {
                self.output.success(&format!(
                    "Backend health: {}",
                    status_text(report.status.as_ref(), "ok")
                ));
                true
            }
            Err(StepError::UnexpectedStatus(status)) => {
                self.output.warning(&format!("Backend returned {status}"));
                false
            }
            Err(e) => {
                self.output
                    .warning(&format!("Backend not responding yet (warming up): {e}"));
                false
            }
        }
    }

    async fn fetch_health(&self) -> Result<HealthReport, StepError> {
        let request = HttpRequest::get(
            self.config.backend.health_url.as_str(),
            self.config.request_timeout,
        );
        let response = self.http.get(&request).await?;
        if !response.is_ok() {
            return Err(StepError::UnexpectedStatus(response.status));
        }
        Ok(response.json()?)
    }

    /// Poll health until it answers or the configured attempts run out.
    pub async fn wait_for_backend(&self, diag: &mut Diagnostics) -> bool {
        let policy = &self.config.health_poll;

        let outcome = poll_until(
            policy,
            &self.clock,
            |_| self.poll_backend_health(),
            |attempt, total, delay| {
                self.output
                    .info(&format!("   Retrying in {delay:?}... ({attempt}/{total})"));
            },
        )
        .await;

        tracing::debug!(
            attempts = outcome.attempts,
            healthy = outcome.succeeded,
            "health poll finished"
        );

        if !outcome.succeeded {
            diag.warn(Warning::health_pending(format!(
                "backend not healthy after {} attempt(s)",
                outcome.attempts
            )));
        }

        outcome.succeeded
    }
}
