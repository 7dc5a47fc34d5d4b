// ABOUTME: Backend platform configuration (Render service and git trigger).
// ABOUTME: Defaults point at the production mindmap-hub-api service.

use serde::{Deserialize, Serialize};

pub const DEFAULT_RENDER_API: &str = "https://api.render.com/v1";
pub const DEFAULT_SERVICE_ID: &str = "srv-clq0e5tni6pcf3d7vtpg";
pub const DEFAULT_HEALTH_URL: &str = "https://mindmap-hub-api.onrender.com/api/v1/health";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub api_url: String,
    pub service_id: String,
    /// Environment variable holding the Render API key.
    pub token_env: String,
    pub health_url: String,
    /// Backend source subtree, relative to the project root.
    pub source_dir: String,
    pub marker_file: String,
    pub marker_version: String,
    pub remote: String,
    pub branch: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_RENDER_API.to_string(),
            service_id: DEFAULT_SERVICE_ID.to_string(),
            token_env: "RENDER_API_KEY".to_string(),
            health_url: DEFAULT_HEALTH_URL.to_string(),
            source_dir: "backend".to_string(),
            marker_file: "DEPLOY_TRIGGER".to_string(),
            marker_version: "2.0.1".to_string(),
            remote: "origin".to_string(),
            branch: "main".to_string(),
        }
    }
}

impl BackendConfig {
    /// Render endpoint reporting the service's most recent deploy.
    pub fn latest_deploy_url(&self) -> String {
        format!(
            "{}/services/{}/latest-deploy",
            self.api_url.trim_end_matches('/'),
            self.service_id
        )
    }

    /// Marker path as seen from the project root, used for the fallback stage.
    pub fn marker_pathspec(&self) -> String {
        format!(
            "{}/{}",
            self.source_dir.trim_end_matches('/'),
            self.marker_file
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_deploy_url_uses_service_id() {
        let config = BackendConfig::default();
        assert_eq!(
            config.latest_deploy_url(),
            "https://api.render.com/v1/services/srv-clq0e5tni6pcf3d7vtpg/latest-deploy"
        );
    }

    #[test]
    fn latest_deploy_url_tolerates_trailing_slash() {
        let config = BackendConfig {
            api_url: "http://localhost:9000/v1/".to_string(),
            service_id: "srv-test".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.latest_deploy_url(),
            "http://localhost:9000/v1/services/srv-test/latest-deploy"
        );
    }

    #[test]
    fn marker_pathspec_joins_source_dir() {
        assert_eq!(
            BackendConfig::default().marker_pathspec(),
            "backend/DEPLOY_TRIGGER"
        );
    }
}
