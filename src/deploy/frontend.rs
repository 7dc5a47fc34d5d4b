// ABOUTME: Frontend step: confirm the deployed page is served and branded.
// ABOUTME: Needs a 200 and the brand marker somewhere in the body.

use super::Orchestrator;
use crate::http::{HttpClient, HttpRequest};
use crate::poll::Clock;
use crate::vcs::VersionControl;

impl<H, V, C> Orchestrator<H, V, C>
where
    H: HttpClient,
    V: VersionControl,
    C: Clock,
{
    pub async fn verify_frontend(&self) -> bool {
        self.output.info("Checking frontend...");

        let frontend = &self.config.frontend;
        let request = HttpRequest::get(frontend.url.as_str(), self.config.request_timeout);

        match self.http.get(&request).await {
            Ok(response) if response.is_ok() && response.body.contains(&frontend.marker) => {
                self.output.success("Frontend is live and responsive");
                true
            }
            Ok(response) if response.is_ok() => {
                self.output.warning(&format!(
                    "Frontend status: 200 but page does not mention '{}'",
                    frontend.marker
                ));
                false
            }
            Ok(response) => {
                self.output
                    .warning(&format!("Frontend status: {}", response.status));
                false
            }
            Err(e) => {
                self.output.warning(&format!("Frontend error: {e}"));
                false
            }
        }
    }
}
