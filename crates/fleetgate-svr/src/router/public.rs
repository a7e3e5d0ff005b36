use axum::{extract::State, Extension, Json};
use fleetgate_core::{Config, GeneralResolver, PublicOracle};
use fleetgate_resolver::OracleRegistry;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSettings {
    pub client_id: String,
    pub login_url: Option<String>,
    pub oracles: Vec<PublicOracle>,
}

pub async fn oracles(Extension(registry): Extension<OracleRegistry>) -> Json<Vec<PublicOracle>> {
    Json(public_oracles(&registry))
}

pub async fn settings(
    State(config): State<Config>,
    Extension(registry): Extension<OracleRegistry>,
) -> Json<PublicSettings> {
    Json(PublicSettings {
        client_id: config.public.client_id.clone(),
        login_url: config.public.login_url.as_ref().map(ToString::to_string),
        oracles: public_oracles(&registry),
    })
}

fn public_oracles(registry: &OracleRegistry) -> Vec<PublicOracle> {
    registry.oracles().iter().map(PublicOracle::from).collect()
}
