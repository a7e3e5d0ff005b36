use axum::{extract::State, Extension};
use fleetgate_core::{Config, Error, Error503};
use fleetgate_proxy::{Forwarder, RelayedResponse};

use crate::utils::{join_segments, RawRequest};

pub async fn decode_vin(
    State(config): State<Config>,
    Extension(forwarder): Extension<Forwarder>,
    req: RawRequest,
) -> Result<RelayedResponse, Error> {
    let base = config
        .upstream
        .definitions
        .as_ref()
        .ok_or(Error503::UpstreamNotConfigured("device definitions"))?;
    let target = join_segments(base, ["device-definitions", "decode-vin"])?;
    forwarder.forward(&req.parts, target, req.body, None).await
}
