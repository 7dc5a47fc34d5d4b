// ABOUTME: Command module aggregator for the mapdeploy CLI.
// ABOUTME: Re-exports deploy and preflight command handlers.

mod deploy;
mod preflight;

pub use deploy::deploy;
pub use preflight::preflight;
