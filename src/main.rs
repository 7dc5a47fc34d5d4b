// ABOUTME: Entry point for the mapdeploy CLI application.
// ABOUTME: Parses arguments, sets up logging and exits with the run's status.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use mapdeploy::config::{self, Config};
use mapdeploy::error::Result;
use mapdeploy::output::{Output, OutputMode};
use std::env;
use std::io::IsTerminal;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let cwd = env::current_dir()?;
    let mode = output_mode(cli.no_color);

    match cli.command.unwrap_or(Commands::Deploy) {
        Commands::Init { force } => {
            let path = config::init_config(&cwd, force)?;
            println!("Created {}", path.display());
            Ok(0)
        }
        Commands::Deploy => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            commands::deploy(config, Output::new(mode)).await
        }
        Commands::Preflight => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            commands::preflight(&config, &Output::new(mode))?;
            Ok(0)
        }
    }
}

fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None => Config::discover(cwd)?,
    };
    Ok(config.with_base_dir(cwd))
}

fn output_mode(no_color: bool) -> OutputMode {
    if no_color || env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
        OutputMode::Plain
    } else {
        OutputMode::Color
    }
}
