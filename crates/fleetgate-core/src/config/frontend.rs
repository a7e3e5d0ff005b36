use serde::{Deserialize, Serialize};
use url::Url;

/// Values the signed-in front end needs to reach wallet infrastructure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FrontendConfig {
    #[serde(default)]
    pub environment: String,
    pub paymaster_url: Option<Url>,
    pub rpc_url: Option<Url>,
    pub bundler_url: Option<Url>,
    #[serde(default)]
    pub turnkey: TurnkeyConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TurnkeyConfig {
    #[serde(default)]
    pub org_id: String,
    pub api_url: Option<Url>,
    #[serde(default)]
    pub rp_id: String,
}
