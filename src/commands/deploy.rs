// ABOUTME: Deploy command implementation.
// ABOUTME: Wires production capabilities into the orchestrator and returns its exit code.

use mapdeploy::config::{Config, Secrets};
use mapdeploy::deploy::Orchestrator;
use mapdeploy::error::{Error, Result};
use mapdeploy::http::ReqwestClient;
use mapdeploy::output::Output;
use mapdeploy::poll::TokioClock;
use mapdeploy::vcs::GitCli;

/// Run the full deployment and return the process exit code.
pub async fn deploy(config: Config, mut output: Output) -> Result<i32> {
    config.validate()?;

    let secrets = Secrets::from_env(&config);
    tracing::debug!(
        backend_token = secrets.backend_token.is_some(),
        database_token = secrets.database_token.is_some(),
        "loaded platform tokens"
    );

    let http = ReqwestClient::new().map_err(|e| Error::HttpClient(e.to_string()))?;

    output.start_timer();
    let orchestrator = Orchestrator::new(config, secrets, http, GitCli::new(), TokioClock, output);
    let report = orchestrator.deploy_all().await;

    Ok(report.exit_code())
}
