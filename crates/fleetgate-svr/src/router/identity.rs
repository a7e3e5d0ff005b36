use axum::{
    extract::{Path, Query},
    Extension,
};
use fleetgate_core::{Error, Error503};
use fleetgate_proxy::{IdentityClient, RelayedResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub first: Option<u32>,
    pub after: Option<String>,
}

pub async fn vehicle(
    Path(token_id): Path<String>,
    identity: Option<Extension<IdentityClient>>,
) -> Result<RelayedResponse, Error> {
    client(identity)?.vehicle_by_token_id(&token_id).await
}

pub async fn owner(
    Path(wallet): Path<String>,
    Query(query): Query<OwnerQuery>,
    identity: Option<Extension<IdentityClient>>,
) -> Result<RelayedResponse, Error> {
    client(identity)?
        .vehicles_by_owner(&wallet, query.first, query.after.as_deref())
        .await
}

fn client(identity: Option<Extension<IdentityClient>>) -> Result<IdentityClient, Error503> {
    identity
        .map(|Extension(client)| client)
        .ok_or(Error503::UpstreamNotConfigured("identity"))
}
