use axum::{
    body::{Body, Bytes},
    response::{IntoResponse, Response},
};
use http::{header, HeaderMap, HeaderName, StatusCode};

// Recomputed by the server for the relayed body.
const SKIPPED_HEADERS: [HeaderName; 3] = [
    header::TRANSFER_ENCODING,
    header::CONNECTION,
    header::CONTENT_LENGTH,
];

/// Upstream answer, fully buffered, relayed to the caller as received.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            if SKIPPED_HEADERS.contains(name) {
                continue;
            }
            // single value per name, the last one wins
            headers.insert(name.clone(), value.clone());
        }
        response
    }
}
