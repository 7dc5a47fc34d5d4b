// ABOUTME: Frontend reachability check configuration.
// ABOUTME: Root URL plus the brand marker the page body must contain.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub url: String,
    pub marker: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            url: "https://mind-map-three-blue.vercel.app".to_string(),
            marker: "NeuralMap".to_string(),
        }
    }
}
