// ABOUTME: Deployment orchestrator running the four release steps in order.
// ABOUTME: Backend, database, health poll, frontend; then summary and exit status.

mod backend;
mod database;
mod error;
mod frontend;
mod health;
mod outcome;
mod summary;

pub use error::StepError;
pub use outcome::{Outcomes, RunReport, Step, StepStatus};

use crate::config::{Config, Secrets};
use crate::diagnostics::Diagnostics;
use crate::http::HttpClient;
use crate::output::Output;
use crate::poll::Clock;
use crate::vcs::VersionControl;

const RULE_WIDTH: usize = 60;

/// Runs one release against the configured platforms.
///
/// Capabilities are injected so the same sequence runs against real
/// platforms or test doubles.
pub struct Orchestrator<H, V, C> {
    config: Config,
    secrets: Secrets,
    http: H,
    vcs: V,
    clock: C,
    output: Output,
}

impl<H, V, C> Orchestrator<H, V, C>
where
    H: HttpClient,
    V: VersionControl,
    C: Clock,
{
    pub fn new(
        config: Config,
        secrets: Secrets,
        http: H,
        vcs: V,
        clock: C,
        output: Output,
    ) -> Self {
        Self {
            config,
            secrets,
            http,
            vcs,
            clock,
            output,
        }
    }

    /// Run every step in order, print the summary and return the report.
    ///
    /// No step aborts the run; each failure is recorded and the next step runs.
    pub async fn deploy_all(&self) -> RunReport {
        let mut diag = Diagnostics::default();
        let mut outcomes = Outcomes::default();

        self.banner("MINDMAP AUTOMATION DEPLOYMENT");

        self.step_header(1, "Backend Deployment");
        outcomes.record(Step::Backend, self.deploy_backend(&mut diag).await);

        self.step_header(2, "Supabase Configuration");
        outcomes.record(Step::Database, self.configure_database(&mut diag).await);

        self.step_header(3, "Waiting for services to be ready");
        outcomes.record(Step::Health, self.wait_for_backend(&mut diag).await);

        self.step_header(4, "Frontend Verification");
        outcomes.record(Step::Frontend, self.verify_frontend().await);

        self.print_summary(&outcomes, &diag);

        let report = RunReport {
            outcomes,
            diagnostics: diag,
        };
        tracing::info!(exit_code = report.exit_code(), "deployment run finished");
        report
    }

    fn banner(&self, title: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        self.output.info(&rule);
        self.output.info(title);
        self.output.info(&rule);
    }

    fn step_header(&self, number: u32, title: &str) {
        self.output.info(&format!("STEP {number}: {title}"));
        self.output.info(&"-".repeat(40));
    }
}

/// Render a reported `status` field: strings bare, other JSON as written.
fn status_text(status: Option<&serde_json::Value>, default: &str) -> String {
    match status {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => default.to_string(),
    }
}
