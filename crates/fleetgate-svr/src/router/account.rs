use axum::{
    extract::{Path, State},
    Extension,
};
use fleetgate_auth::DeveloperJwtService;
use fleetgate_core::{Config, Error, Error503, GeneralTokenSource};
use fleetgate_proxy::{Forwarder, RelayedResponse};
use url::Url;

use crate::utils::{join_segments, RawRequest};

pub async fn get(
    State(config): State<Config>,
    Path(email_or_wallet): Path<String>,
    Extension(forwarder): Extension<Forwarder>,
    developer: Option<Extension<DeveloperJwtService>>,
    req: RawRequest,
) -> Result<RelayedResponse, Error> {
    let target = join_segments(
        accounts_url(&config)?,
        ["api", "account", email_or_wallet.as_str()],
    )?;
    let auth = developer_auth(developer).await?;
    forwarder
        .forward(&req.parts, target, req.body, Some(&auth))
        .await
}

pub async fn create(
    State(config): State<Config>,
    Extension(forwarder): Extension<Forwarder>,
    developer: Option<Extension<DeveloperJwtService>>,
    req: RawRequest,
) -> Result<RelayedResponse, Error> {
    let target = join_segments(accounts_url(&config)?, ["api", "account"])?;
    let auth = developer_auth(developer).await?;
    forwarder
        .forward(&req.parts, target, req.body, Some(&auth))
        .await
}

fn accounts_url(config: &Config) -> Result<&Url, Error503> {
    config
        .upstream
        .accounts
        .as_ref()
        .ok_or(Error503::UpstreamNotConfigured("accounts"))
}

async fn developer_auth(
    developer: Option<Extension<DeveloperJwtService>>,
) -> Result<String, Error> {
    let Extension(developer) = developer.ok_or(Error503::UpstreamNotConfigured("developer"))?;
    Ok(format!("Bearer {}", developer.token().await?))
}
