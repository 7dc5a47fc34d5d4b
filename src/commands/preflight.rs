// ABOUTME: Preflight command implementation.
// ABOUTME: Validates configuration offline and reports masked token presence.

use mapdeploy::config::{Config, Secrets, Token};
use mapdeploy::error::Result;
use mapdeploy::output::Output;

/// Validate `config` and print what a deploy would use.
pub fn preflight(config: &Config, output: &Output) -> Result<()> {
    if let Err(e) = config.validate() {
        output.error(&e.to_string());
        return Err(e);
    }

    let secrets = Secrets::from_env(config);

    output.success("Preflight passed");
    let root = config.project_root.display();
    output.info(&format!("   Project root: {root}"));
    output.info(&format!("   Render service: {}", config.backend.service_id));
    output.info(&format!("   Supabase project: {}", config.database.project_id));
    output.info(&format!("   Health URL: {}", config.backend.health_url));
    output.info(&format!("   Frontend URL: {}", config.frontend.url));
    output.info(&format!(
        "   Health poll: {} attempt(s), {:?} apart",
        config.health_poll.attempts, config.health_poll.interval
    ));

    report_token(
        output,
        &config.backend.token_env,
        secrets.backend_token.as_ref(),
        "backend redeploy falls back to git push",
    );
    report_token(
        output,
        &config.database.token_env,
        secrets.database_token.as_ref(),
        "Supabase configuration will be assumed",
    );

    Ok(())
}

fn report_token(output: &Output, var: &str, token: Option<&Token>, fallback: &str) {
    match token {
        Some(token) => output.info(&format!("   {var}: {}", token.masked())),
        None => output.warning(&format!("   {var}: [empty] ({fallback})")),
    }
}
