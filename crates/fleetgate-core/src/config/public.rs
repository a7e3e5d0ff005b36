use serde::{Deserialize, Serialize};
use url::Url;

/// Values handed to the front end before login.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PublicConfig {
    #[serde(default)]
    pub client_id: String,
    pub login_url: Option<Url>,
}
