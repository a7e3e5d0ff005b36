use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{FromRequestParts, Path},
    response::{IntoResponse, Response},
};
use fleetgate_core::{GeneralResolver, Oracle};
use fleetgate_resolver::{oracle_target, strip_routing_prefix, OracleRegistry};
use http::{request::Parts, StatusCode};
use url::Url;

pub const ORACLE_ID_PARAM: &str = "oracle_id";

/// Oracle named by the `{oracle_id}` path segment and the upstream url the request maps to.
///
/// Unknown ids are rejected here, before any handler runs.
#[derive(Debug, Clone)]
pub struct RoutingContext {
    pub oracle: Oracle,
    pub target: Url,
}

impl<S> FromRequestParts<S> for RoutingContext
where
    S: Send + Sync,
{
    type Rejection = Response<Body>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let registry = parts.extensions.get::<OracleRegistry>().cloned().ok_or_else(|| {
            tracing::error!("services middleware not found");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })?;
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let oracle_id = params
            .get(ORACLE_ID_PARAM)
            .map(String::as_str)
            .unwrap_or_default();

        let oracle = registry
            .resolve(oracle_id)
            .map_err(IntoResponse::into_response)?
            .clone();
        let stripped = strip_routing_prefix(parts.uri.path());
        let target = oracle_target(&oracle.base_url, &stripped);
        Ok(Self { oracle, target })
    }
}
