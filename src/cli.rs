// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: No subcommand means deploy; init and preflight are auxiliary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mapdeploy")]
#[command(about = "Release the MindMap backend and verify Supabase and the frontend")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to mapdeploy.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full deployment (default)
    Deploy,

    /// Write a mapdeploy.yml holding the built-in defaults
    Init {
        /// Overwrite an existing mapdeploy.yml
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration and report which tokens are set
    Preflight,
}
