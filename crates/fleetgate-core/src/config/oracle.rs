use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    pub id: String,
    pub name: String,
    pub url: Url,
    #[serde(default)]
    pub use_pending_mode: bool,
}
