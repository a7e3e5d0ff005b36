use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use http::{header, StatusCode};
use httpbuilder::errors::HttpBuilderError;
use serde::Serialize;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Rejected before any upstream call
    #[error("Unknown oracle: {0}")]
    UnknownOracle(String),

    #[error("Bad Request: {0}")]
    BadRequest(#[from] Error400),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(#[from] Error503),

    // Forwarding failures, expected 5xx
    #[error("Failed to create request: {0}")]
    RequestConstruction(#[from] HttpBuilderError),

    #[error("Failed to send request to {target}: {source}")]
    UpstreamUnreachable {
        target: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response from {target}: {source}")]
    ResponseRead {
        target: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("Developer credential mint failed: {0}")]
    CredentialMint(#[from] MintError),

    #[error("Fleet provider authentication failed: {0}")]
    ProviderAuth(#[from] ProviderAuthError),

    #[error("Fleet provider call failed: {0}")]
    ProviderCall(tonic::Status),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Json error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Url error: {0}")]
    UrlError(#[from] url::ParseError),
}

#[derive(Debug, thiserror::Error)]
pub enum Error400 {
    #[error("Invalid VIN '{0}', expected 17 alphanumeric characters")]
    InvalidVin(String),

    #[error("At least one VIN is required")]
    NoVins,

    #[error("Invalid token id '{0}'")]
    InvalidTokenId(String),

    #[error("Invalid wallet address '{0}'")]
    InvalidWallet(String),

    #[error("Upstream rejected the request")]
    UpstreamRejected,
}

#[derive(Debug, thiserror::Error)]
pub enum Error503 {
    #[error("No {0} upstream configured")]
    UpstreamNotConfigured(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum MintError {
    #[error("failed to generate key pair")]
    KeyGeneration,

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("failed to execute registration request: {0}")]
    RegistrationRequest(#[from] reqwest::Error),

    #[error("registration failed with status {status}: {body}")]
    Registration { status: StatusCode, body: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderAuthError {
    #[error("no api key configured")]
    MissingApiKey,

    #[error("invalid provider endpoint: {0}")]
    InvalidEndpoint(#[from] tonic::transport::Error),

    #[error("authentication rejected: {0}")]
    Rejected(tonic::Status),

    #[error("access token is not a valid header value")]
    InvalidAccessToken,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("oracle id '{0}' is registered more than once")]
    DuplicateOracle(String),

    #[error("oracle id '{0}' is not a url-safe token")]
    InvalidOracleId(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownOracle(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamUnreachable { .. } => StatusCode::BAD_GATEWAY,
            Self::ProviderAuth(
                ProviderAuthError::MissingApiKey | ProviderAuthError::InvalidEndpoint(_),
            ) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ProviderAuth(_) | Self::ProviderCall(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Server side failures only name their category,
    /// the full chain goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::UnknownOracle(_) | Self::BadRequest(_) | Self::ServiceUnavailable(_) => {
                self.to_string()
            }
            Self::RequestConstruction(_) => "Failed to create request".to_string(),
            Self::UpstreamUnreachable { .. } => "Failed to send request".to_string(),
            Self::ResponseRead { .. } => "Failed to read response".to_string(),
            Self::CredentialMint(_) => "Failed to obtain developer credential".to_string(),
            Self::ProviderAuth(ProviderAuthError::InvalidEndpoint(_)) => {
                "Fleet provider is misconfigured".to_string()
            }
            Self::ProviderAuth(_) => "Failed to authenticate with fleet provider".to_string(),
            Self::ProviderCall(_) => "Fleet provider call failed".to_string(),
            _ => "Internal error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response<Body> {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, status = status.as_u16(), "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorBody {
            code: status.as_u16(),
            message: self.public_message(),
        };
        let body = serde_json::to_vec(&body).unwrap_or_default();
        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        response
    }
}
