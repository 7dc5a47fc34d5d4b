// ABOUTME: Library root for mapdeploy - exposes the orchestrator and its capabilities.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod http;
pub mod output;
pub mod poll;
pub mod vcs;
