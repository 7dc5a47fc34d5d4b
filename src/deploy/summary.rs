// ABOUTME: End-of-run report: collected warnings, per-step status lines and live links.
// ABOUTME: Assumed successes count toward exit 0 but are labelled as such.

use super::{Orchestrator, Outcomes, RULE_WIDTH};
use crate::diagnostics::Diagnostics;
use crate::http::HttpClient;
use crate::poll::Clock;
use crate::vcs::VersionControl;

impl<H, V, C> Orchestrator<H, V, C>
where
    H: HttpClient,
    V: VersionControl,
    C: Clock,
{
    pub(super) fn print_summary(&self, outcomes: &Outcomes, diag: &Diagnostics) {
        if diag.has_warnings() {
            self.output.info("Warnings:");
            for warning in diag.warnings() {
                self.output.warning(&format!("   {}", warning.message));
            }
        }

        self.banner("DEPLOYMENT SUMMARY");
        for (step, status) in outcomes.iter() {
            self.output
                .status(status.is_success(), &step.summary_line(status));
        }
        self.output.info(&"=".repeat(RULE_WIDTH));

        let config = &self.config;
        self.output.info("LIVE LINKS:");
        self.output
            .info(&format!("   Frontend: {}", config.frontend.url));
        self.output
            .info(&format!("   Backend: {}", config.backend.health_url));
        self.output.info(&format!(
            "   Supabase: {}",
            config.database.dashboard_link()
        ));

        let elapsed = self.output.elapsed_secs();
        if elapsed > 0.0 {
            self.output.info(&format!("Finished in {elapsed:.1}s"));
        }
    }
}
