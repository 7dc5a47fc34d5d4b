// ABOUTME: Database step: confirm the Supabase project through the management API.
// ABOUTME: Unreachable API or missing token records an assumed success.

use super::{Orchestrator, StepError, StepStatus};
use crate::config::Token;
use crate::diagnostics::{Diagnostics, Warning};
use crate::http::{HttpClient, HttpRequest};
use crate::poll::Clock;
use crate::vcs::VersionControl;
use serde::Deserialize;

const KEY_PREVIEW_CHARS: usize = 20;

#[derive(Debug, Deserialize)]
struct ProjectInfo {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    api_keys: ApiKeys,
}

#[derive(Debug, Default, Deserialize)]
struct ApiKeys {
    #[serde(default)]
    anon_key: Option<String>,
    #[serde(default)]
    service_role: Option<String>,
}

impl<H, V, C> Orchestrator<H, V, C>
where
    H: HttpClient,
    V: VersionControl,
    C: Clock,
{
    /// Fetch the project and preview its API keys.
    ///
    /// A non-200 answer fails the step. Any other problem (no token, transport
    /// error, unreadable body) records [`StepStatus::Assumed`]: the project is
    /// taken to exist already.
    pub async fn configure_database(&self, diag: &mut Diagnostics) -> StepStatus {
        self.output.info("Configuring Supabase...");

        let Some(token) = self.secrets.database_token.as_ref() else {
            let reason = format!("{} not set", self.config.database.token_env);
            return self.assume_configured(diag, reason);
        };

        match self.fetch_project(token).await {
            Ok(project) => {
                self.output.success(&format!(
                    "Supabase project: {}",
                    project.name.as_deref().unwrap_or("unknown")
                ));
                self.output.info(&format!(
                    "   Anon Key: {}...",
                    key_preview(project.api_keys.anon_key.as_deref())
                ));
                self.output.info(&format!(
                    "   Service Role: {}...",
                    key_preview(project.api_keys.service_role.as_deref())
                ));
                StepStatus::Succeeded
            }
            Err(StepError::UnexpectedStatus(status)) => {
                self.output.warning(&format!(
                    "Could not fetch Supabase project (status {status})"
                ));
                StepStatus::Failed
            }
            Err(e) => self.assume_configured(diag, format!("Supabase API unavailable: {e}")),
        }
    }

    async fn fetch_project(&self, token: &Token) -> Result<ProjectInfo, StepError> {
        let request = HttpRequest::get(
            self.config.database.project_url(),
            self.config.request_timeout,
        )
        .bearer(token.expose());

        let response = self.http.get(&request).await?;
        if !response.is_ok() {
            return Err(StepError::UnexpectedStatus(response.status));
        }
        Ok(response.json()?)
    }

    fn assume_configured(&self, diag: &mut Diagnostics, reason: String) -> StepStatus {
        self.output.warning(&reason);
        self.output
            .info("Supabase is already configured with existing project");
        diag.warn(Warning::assumed_configured(format!(
            "Supabase configuration assumed, not verified: {reason}"
        )));
        StepStatus::Assumed
    }
}

/// First characters of a key, enough to recognise it without disclosing it.
fn key_preview(key: Option<&str>) -> String {
    key.unwrap_or("N/A")
        .chars()
        .take(KEY_PREVIEW_CHARS)
        .collect()
}
