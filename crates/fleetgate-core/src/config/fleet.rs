use redact::Secret;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FleetConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(
        default = "empty_api_key",
        serialize_with = "redact::serde::redact_secret"
    )]
    pub api_key: Secret<String>,
    #[serde(default = "default_region")]
    pub region: i32,
}

impl FleetConfig {
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.expose_secret().as_str();
        if key.trim().is_empty() {
            None
        } else {
            Some(key)
        }
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: empty_api_key(),
            region: default_region(),
        }
    }
}

fn default_endpoint() -> String {
    "https://nativeconnect.cloud:443".to_string()
}

fn empty_api_key() -> Secret<String> {
    Secret::new(String::new())
}

// North America
fn default_region() -> i32 {
    2
}
