use httpbuilder::http_reference::HttpReference;
use serde::{Deserialize, Serialize};
use serde_with::{formats::PreferOne, serde_as, OneOrMany};

#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApplicationConfig {
    pub log_filter: Option<String>,
    #[serde(default)]
    pub prometheus: bool,
    #[serde(default = "default_true")]
    pub health_check: bool,
    /// Request values surfaced in the log line of every proxied call.
    #[serde(default = "default_log_context")]
    #[serde_as(as = "OneOrMany<_, PreferOne>")]
    pub log_context: Vec<HttpReference>,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            prometheus: false,
            health_check: true,
            log_context: default_log_context(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_context() -> Vec<HttpReference> {
    vec![HttpReference::Header("Tenant-Id".to_string())]
}
