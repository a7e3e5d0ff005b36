#[derive(Debug, thiserror::Error)]
pub enum HttpBuilderError {
    #[error("target url has no http(s) scheme")]
    NoScheme,

    #[error("target url has no hostname")]
    NoHostname,

    #[error("invalid value for header {0}")]
    InvalidHeaderValue(http::HeaderName),

    #[error("http client rejected the request: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),
}
