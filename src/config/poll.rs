// ABOUTME: Health poll configuration.
// ABOUTME: Fixed attempt count and fixed delay between attempts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
}

fn default_attempts() -> u32 {
    6
}

fn default_interval() -> Duration {
    Duration::from_secs(5)
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            attempts: default_attempts(),
            interval: default_interval(),
        }
    }
}
