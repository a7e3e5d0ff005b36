use serde::{Deserialize, Serialize};
use url::Url;

/// Fixed upstreams targeted by hand-written routes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpstreamConfig {
    pub accounts: Option<Url>,
    pub identity: Option<Url>,
    pub definitions: Option<Url>,
}
