use std::future::Future;

use fleetgate_core::ProviderAuthError;
use tonic::{
    client::Grpc,
    codec::ProstCodec,
    codegen::http::uri::PathAndQuery,
    transport::{Channel, ClientTlsConfig, Endpoint},
    Request, Status,
};

use crate::proto::{
    AuthenticateRequest, AuthenticateResponse, BatchVehicleSignUpRequest,
    BatchVehicleSignUpResponse,
};

const AUTHENTICATE_PATH: &str = "/nativeconnect.api.v1.Service/Authenticate";
const BATCH_VEHICLE_SIGN_UP_PATH: &str = "/nativeconnect.api.v1.Service/BatchVehicleSignUp";

/// Parses the configured provider endpoint without building a channel.
pub fn check_endpoint(endpoint: &str) -> Result<(), ProviderAuthError> {
    Endpoint::from_shared(endpoint.to_string())?;
    Ok(())
}

/// The two fleet-data provider calls a session makes.
pub trait CompassTransport: Send {
    fn authenticate(
        &mut self,
        request: Request<AuthenticateRequest>,
    ) -> impl Future<Output = Result<AuthenticateResponse, Status>> + Send;

    fn batch_vehicle_sign_up(
        &mut self,
        request: Request<BatchVehicleSignUpRequest>,
    ) -> impl Future<Output = Result<BatchVehicleSignUpResponse, Status>> + Send;
}

/// gRPC client over a dedicated TLS channel trusting the system roots.
#[derive(Debug, Clone)]
pub struct GrpcCompassTransport {
    inner: Grpc<Channel>,
}

impl GrpcCompassTransport {
    /// Builds the channel without connecting; the first call dials the provider.
    pub fn connect_lazy(endpoint: &str) -> Result<Self, ProviderAuthError> {
        let mut endpoint = Endpoint::from_shared(endpoint.to_string())?;
        if endpoint.uri().scheme_str() == Some("https") {
            endpoint = endpoint.tls_config(ClientTlsConfig::new().with_native_roots())?;
        }
        let channel = endpoint.connect_lazy();
        Ok(Self {
            inner: Grpc::new(channel),
        })
    }

    async fn unary<Req, Res>(
        &mut self,
        request: Request<Req>,
        path: &'static str,
    ) -> Result<Res, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Res: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unavailable(format!("fleet provider not ready: {e}")))?;
        let codec = ProstCodec::<Req, Res>::default();
        let response = self
            .inner
            .unary(request, PathAndQuery::from_static(path), codec)
            .await?;
        Ok(response.into_inner())
    }
}

impl CompassTransport for GrpcCompassTransport {
    async fn authenticate(
        &mut self,
        request: Request<AuthenticateRequest>,
    ) -> Result<AuthenticateResponse, Status> {
        self.unary(request, AUTHENTICATE_PATH).await
    }

    async fn batch_vehicle_sign_up(
        &mut self,
        request: Request<BatchVehicleSignUpRequest>,
    ) -> Result<BatchVehicleSignUpResponse, Status> {
        self.unary(request, BATCH_VEHICLE_SIGN_UP_PATH).await
    }
}
