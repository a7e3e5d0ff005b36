use axum::{extract::State, Json};
use fleetgate_core::{is_valid_vin, Config, Error, Error400, VinEnrollmentStatus};
use fleetgate_fleet::FleetSession;
use serde::Deserialize;

use crate::utils::JsonRequest;

#[derive(Debug, Deserialize)]
pub struct AddVehiclesRequest {
    pub vins: Vec<String>,
    pub email: String,
}

/// Enrolls VINs with the fleet-data provider in a session scoped to this request.
pub async fn handler(
    State(config): State<Config>,
    req: JsonRequest<AddVehiclesRequest>,
) -> Result<Json<Vec<VinEnrollmentStatus>>, Error> {
    let AddVehiclesRequest { vins, email } = req.json;
    if vins.is_empty() {
        return Err(Error400::NoVins.into());
    }
    if let Some(bad) = vins.iter().find(|vin| !is_valid_vin(vin)) {
        return Err(Error400::InvalidVin(bad.clone()).into());
    }

    let mut session = FleetSession::open(&config.fleet)?.authenticate().await?;
    let statuses = session.add_vins(&vins, &email).await;
    session.close();

    let statuses = statuses?;
    let approved = statuses.iter().filter(|s| s.status.is_approved()).count();
    tracing::info!(requested = vins.len(), approved, "vin enrollment finished");
    Ok(Json(statuses))
}
