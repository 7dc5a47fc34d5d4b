// ABOUTME: Database platform configuration (Supabase management API).
// ABOUTME: Holds the project id and where to find the access token.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SUPABASE_API: &str = "https://api.supabase.com/v1";
pub const DEFAULT_PROJECT_ID: &str = "mvkrlvjyocynmwslklzu";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub api_url: String,
    pub project_id: String,
    pub token_env: String,
    /// Base of the dashboard link printed in the summary.
    pub dashboard_url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_SUPABASE_API.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            token_env: "SUPABASE_ACCESS_TOKEN".to_string(),
            dashboard_url: "https://app.supabase.com/project".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn project_url(&self) -> String {
        format!(
            "{}/projects/{}",
            self.api_url.trim_end_matches('/'),
            self.project_id
        )
    }

    pub fn dashboard_link(&self) -> String {
        format!(
            "{}/{}",
            self.dashboard_url.trim_end_matches('/'),
            self.project_id
        )
    }
}
