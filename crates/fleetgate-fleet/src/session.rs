use std::collections::HashMap;

use fleetgate_core::{Error, FleetConfig, ProviderAuthError, VinEnrollmentStatus, VinStatus};
use tonic::{
    metadata::{Ascii, MetadataValue},
    Request,
};
use uuid::Uuid;

use crate::{
    proto::{
        auth_request::Provider, AddConsentStatus, AuthRequest, AuthenticateRequest,
        BatchVehicleSignUpRequest, Consent, Scope, VinAuth,
    },
    CompassTransport, GrpcCompassTransport,
};

/// Logs the end of a session on every exit path.
#[derive(Debug)]
struct SessionGuard {
    id: Uuid,
}

impl SessionGuard {
    fn new() -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "fleet session opened");
        Self { id }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        tracing::debug!(session = %self.id, "fleet session closed");
    }
}

/// A fleet-data session that has not authenticated yet.
///
/// Owned by one request. Dropping it, or the [`AuthenticatedFleetSession`] it
/// turns into, closes the underlying channel.
pub struct FleetSession<T = GrpcCompassTransport> {
    transport: T,
    api_key: Option<String>,
    region: i32,
    guard: SessionGuard,
}

impl FleetSession<GrpcCompassTransport> {
    /// Fails with `MissingApiKey` before building any channel when no key is configured.
    pub fn open(config: &FleetConfig) -> Result<Self, Error> {
        let api_key = config.api_key().ok_or(ProviderAuthError::MissingApiKey)?;
        let transport = GrpcCompassTransport::connect_lazy(&config.endpoint)?;
        Ok(Self::with_transport(
            transport,
            Some(api_key.to_string()),
            config.region,
        ))
    }
}

impl<T: CompassTransport> FleetSession<T> {
    pub fn with_transport(transport: T, api_key: Option<String>, region: i32) -> Self {
        Self {
            transport,
            api_key,
            region,
            guard: SessionGuard::new(),
        }
    }

    /// Exchanges the API key for a bearer token used by every later call.
    pub async fn authenticate(mut self) -> Result<AuthenticatedFleetSession<T>, Error> {
        let Some(token) = self.api_key.take() else {
            return Err(ProviderAuthError::MissingApiKey.into());
        };
        let response = self
            .transport
            .authenticate(Request::new(AuthenticateRequest { token }))
            .await
            .map_err(ProviderAuthError::Rejected)?;
        let bearer = format!("Bearer {}", response.access_token)
            .parse::<MetadataValue<Ascii>>()
            .map_err(|_| ProviderAuthError::InvalidAccessToken)?;
        tracing::debug!(session = %self.guard.id, "fleet session authenticated");

        Ok(AuthenticatedFleetSession {
            transport: self.transport,
            bearer,
            region: self.region,
            guard: self.guard,
        })
    }
}

pub struct AuthenticatedFleetSession<T = GrpcCompassTransport> {
    transport: T,
    bearer: MetadataValue<Ascii>,
    region: i32,
    guard: SessionGuard,
}

impl<T: CompassTransport> AuthenticatedFleetSession<T> {
    /// Enrolls `vins` in one batch call with read and command consent.
    ///
    /// Returns one entry per input VIN, in input order, with the VIN uppercased as
    /// the provider stores it. Non-approved statuses are reported, only a failed
    /// call is an error.
    pub async fn add_vins(
        &mut self,
        vins: &[String],
        email: &str,
    ) -> Result<Vec<VinEnrollmentStatus>, Error> {
        let vins: Vec<String> = vins.iter().map(|vin| vin.to_ascii_uppercase()).collect();
        let consent = vins
            .iter()
            .map(|vin| Consent {
                provider_auth: Some(AuthRequest {
                    provider: Some(Provider::Vin(VinAuth { vin: vin.clone() })),
                }),
                scopes: vec![Scope::Read as i32, Scope::Command as i32],
                region: self.region,
            })
            .collect();
        let mut request = Request::new(BatchVehicleSignUpRequest {
            consent_email: email.to_string(),
            consent,
        });
        request
            .metadata_mut()
            .insert("authorization", self.bearer.clone());

        let response = self
            .transport
            .batch_vehicle_sign_up(request)
            .await
            .map_err(Error::ProviderCall)?;

        let returned: HashMap<String, VinStatus> = response
            .vin_with_statuses
            .into_iter()
            .map(|status| (status.vin, vin_status(status.add_consent_status)))
            .collect();

        let statuses: Vec<_> = vins
            .iter()
            .map(|vin| {
                let status = returned
                    .get(vin)
                    .cloned()
                    .unwrap_or_else(|| VinStatus::Other("NOT_RETURNED".to_string()));
                if status.is_approved() {
                    tracing::info!(session = %self.guard.id, vin = %vin, "vin enrollment approved");
                } else {
                    tracing::warn!(session = %self.guard.id, vin = %vin, status = %status, "vin enrollment not approved");
                }
                VinEnrollmentStatus {
                    vin: vin.clone(),
                    status,
                }
            })
            .collect();
        Ok(statuses)
    }

    pub fn close(self) {
        drop(self);
    }
}

fn vin_status(code: i32) -> VinStatus {
    match AddConsentStatus::try_from(code) {
        Ok(AddConsentStatus::Approved) => VinStatus::Approved,
        Ok(other) => VinStatus::Other(other.short_name().to_string()),
        Err(_) => VinStatus::Other(format!("UNRECOGNIZED_{code}")),
    }
}
