use axum::Extension;
use fleetgate_core::Error;
use fleetgate_proxy::{Forwarder, RelayedResponse};

use crate::{middlewares::RoutingContext, utils::RawRequest};

/// Any method under `/oracle/{oracle_id}`: forwarded to `{oracle base}/v1{rest of path}`.
pub async fn handler(
    Extension(forwarder): Extension<Forwarder>,
    routing: RoutingContext,
    req: RawRequest,
) -> Result<RelayedResponse, Error> {
    tracing::debug!(oracle = %routing.oracle.id, target = %routing.target, "oracle route resolved");
    forwarder
        .forward(&req.parts, routing.target, req.body, None)
        .await
}
