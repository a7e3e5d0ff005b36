use axum::{extract::State, Json};
use fleetgate_core::Config;
use serde::Serialize;
use url::Url;

/// Front-end settings for signed-in users. Unset urls render as empty strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub accounts_api_url: String,
    pub paymaster_url: String,
    pub rpc_url: String,
    pub bundler_url: String,
    pub environment: String,
    pub turnkey_org_id: String,
    pub turnkey_api_url: String,
    pub turnkey_rp_id: String,
}

pub async fn handler(State(config): State<Config>) -> Json<Settings> {
    let frontend = &config.frontend;
    Json(Settings {
        accounts_api_url: url_or_empty(config.upstream.accounts.as_ref()),
        paymaster_url: url_or_empty(frontend.paymaster_url.as_ref()),
        rpc_url: url_or_empty(frontend.rpc_url.as_ref()),
        bundler_url: url_or_empty(frontend.bundler_url.as_ref()),
        environment: frontend.environment.clone(),
        turnkey_org_id: frontend.turnkey.org_id.clone(),
        turnkey_api_url: url_or_empty(frontend.turnkey.api_url.as_ref()),
        turnkey_rp_id: frontend.turnkey.rp_id.clone(),
    })
}

fn url_or_empty(url: Option<&Url>) -> String {
    url.map(ToString::to_string).unwrap_or_default()
}
