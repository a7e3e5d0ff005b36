use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get, post},
    Router,
};
use fleetgate_core::{Config, Error};
use tower_http::cors::CorsLayer;

use crate::middlewares::{trace_layer, Services, ServicesLayer};
use meta::Meta;

pub mod meta;

pub mod account;
pub mod definitions;
pub mod identity;
pub mod proxy;
pub mod public;
pub mod settings;
pub mod vehicles;

pub fn router(config: Config) -> Result<Router, Error> {
    let services = Services::new(&config)?;
    let meta = Meta::new(&config);

    let mut router = Router::new()
        .route("/oracle/{oracle_id}", any(proxy::handler))
        .route("/oracle/{oracle_id}/", any(proxy::handler))
        .route("/oracle/{oracle_id}/{*path}", any(proxy::handler))
        .route("/v1/vehicles", post(vehicles::handler))
        .route("/v1/settings", get(settings::handler))
        .route("/account", post(account::create))
        .route("/account/{email_or_wallet}", get(account::get))
        .route("/device-definitions/decode-vin", post(definitions::decode_vin))
        .route("/identity/vehicle/{token_id}", get(identity::vehicle))
        .route("/identity/owner/{wallet}", get(identity::owner))
        .route("/public/oracles", get(public::oracles))
        .route("/public/settings", get(public::settings))
        .nest("/.meta", meta.router);
    if config.application.health_check {
        router = router.route("/", get(meta::liveness));
    }
    if let Some(metrics) = meta.metrics {
        router = router.layer(metrics);
    }

    let router = router
        .layer(ServicesLayer::new(services))
        .layer(DefaultBodyLimit::max(config.server.body_limit))
        .layer(trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(config);
    Ok(router)
}
