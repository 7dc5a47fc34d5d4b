// ABOUTME: Configuration types and parsing for mapdeploy.yml.
// ABOUTME: Every field has a production default; the file only overrides.

mod backend;
mod database;
mod frontend;
mod poll;
mod secrets;

pub use backend::BackendConfig;
pub use database::DatabaseConfig;
pub use frontend::FrontendConfig;
pub use poll::PollConfig;
pub use secrets::{Secrets, Token, mask};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "mapdeploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "mapdeploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".mapdeploy/config.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub frontend: FrontendConfig,

    #[serde(default)]
    pub health_poll: PollConfig,
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            project_root: default_project_root(),
            request_timeout: default_request_timeout(),
            backend: BackendConfig::default(),
            database: DatabaseConfig::default(),
            frontend: FrontendConfig::default(),
            health_poll: PollConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, or the defaults when there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("loading configuration from {}", path.display());
                return Self::load(path);
            }
        }

        tracing::debug!("no configuration file in {}, using defaults", dir.display());
        Ok(Self::default())
    }

    /// Resolve a relative `project_root` against `cwd`.
    pub fn with_base_dir(mut self, cwd: &Path) -> Self {
        if self.project_root.is_relative() {
            self.project_root = cwd.join(&self.project_root);
        }
        self
    }

    /// Backend source subtree holding the deploy marker.
    pub fn backend_dir(&self) -> PathBuf {
        self.project_root.join(&self.backend.source_dir)
    }

    /// Check URLs, identifiers and poll bounds without touching the network.
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("backend.api_url", &self.backend.api_url),
            ("backend.health_url", &self.backend.health_url),
            ("database.api_url", &self.database.api_url),
            ("database.dashboard_url", &self.database.dashboard_url),
            ("frontend.url", &self.frontend.url),
        ];
        for (field, value) in urls {
            if !is_http_url(value) {
                return Err(Error::InvalidConfig(format!(
                    "{field} must be an http(s) URL, got '{value}'"
                )));
            }
        }

        let required = [
            ("backend.service_id", &self.backend.service_id),
            ("backend.token_env", &self.backend.token_env),
            ("backend.source_dir", &self.backend.source_dir),
            ("backend.marker_file", &self.backend.marker_file),
            ("backend.remote", &self.backend.remote),
            ("backend.branch", &self.backend.branch),
            ("database.project_id", &self.database.project_id),
            ("database.token_env", &self.database.token_env),
            ("frontend.marker", &self.frontend.marker),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{field} cannot be empty")));
            }
        }

        if self.health_poll.attempts == 0 {
            return Err(Error::InvalidConfig(
                "health_poll.attempts must be at least 1".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "request_timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    reqwest::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Write a template config holding the defaults into `dir`.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = serde_yaml::to_string(&Config::default())?;
    std::fs::write(&config_path, yaml)?;

    Ok(config_path)
}
