use axum::{routing::get, Json, Router};
use axum_health::Health;
use axum_prometheus::PrometheusMetricLayer;
use fleetgate_core::Config;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Liveness {
    pub data: &'static str,
}

/// `GET /`, polled by the load balancer.
pub async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        data: "Server is up and running",
    })
}

/// Operational routes served under `/.meta`.
pub struct Meta {
    pub router: Router<Config>,
    /// Recorder for every route of the app, not only `/.meta`.
    pub metrics: Option<PrometheusMetricLayer<'static>>,
}

impl Meta {
    pub fn new(config: &Config) -> Self {
        let mut router = Router::new();
        if config.application.health_check {
            router = router
                .route("/health", get(axum_health::health))
                .layer(Health::builder().build());
        }

        let mut metrics = None;
        if config.application.prometheus {
            tracing::info!("prometheus metrics enabled at /.meta/metrics");
            let (layer, handle) = PrometheusMetricLayer::pair();
            router = router.route("/metrics", get(move || async move { handle.render() }));
            metrics = Some(layer);
        }
        Self { router, metrics }
    }
}
