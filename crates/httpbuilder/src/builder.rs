use http::{
    header::{self, HeaderName, HeaderValue},
    HeaderMap, Method,
};
use url::Url;

use crate::errors::HttpBuilderError;

// Framing headers belong to a single hop and are recomputed by the outbound client.
const HOP_HEADERS: [HeaderName; 5] = [
    header::HOST,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
    header::TRAILER,
];

const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// Outbound request derived from one inbound request. Never reused.
#[derive(Debug, Clone)]
pub struct ProxiedRequest {
    pub method: Method,
    pub target: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

pub struct HttpBuilder<'a> {
    src: &'a http::request::Parts,
    target: Url,
    body: Vec<u8>,
    override_auth: Option<String>,
}

impl<'a> HttpBuilder<'a> {
    pub fn new(src: &'a http::request::Parts, target: Url) -> Result<Self, HttpBuilderError> {
        if !matches!(target.scheme(), "http" | "https") {
            return Err(HttpBuilderError::NoScheme);
        }
        if target.host_str().map_or(true, str::is_empty) {
            return Err(HttpBuilderError::NoHostname);
        }
        Ok(HttpBuilder {
            src,
            target,
            body: Vec::new(),
            override_auth: None,
        })
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Replaces any inbound `Authorization` header. Empty values are ignored.
    pub fn override_auth(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.override_auth = (!value.is_empty()).then_some(value);
        self
    }

    /// Copies the inbound raw query onto the target as is.
    pub fn inbound_query(mut self) -> Self {
        self.target.set_query(self.src.uri.query());
        self
    }

    pub fn build(self) -> Result<ProxiedRequest, HttpBuilderError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, APPLICATION_JSON);
        if !self.body.is_empty() {
            headers.insert(header::CONTENT_TYPE, APPLICATION_JSON);
        }

        for name in self.src.headers.keys() {
            if HOP_HEADERS.contains(name) {
                continue;
            }
            if *name == header::AUTHORIZATION && self.override_auth.is_some() {
                continue;
            }
            // inbound values follow the json defaults, never replace them
            for value in self.src.headers.get_all(name) {
                headers.append(name.clone(), value.clone());
            }
        }

        if let Some(auth) = &self.override_auth {
            let value = HeaderValue::from_str(auth)
                .map_err(|_| HttpBuilderError::InvalidHeaderValue(header::AUTHORIZATION))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        Ok(ProxiedRequest {
            method: self.src.method.clone(),
            target: self.target,
            headers,
            body: (!self.body.is_empty()).then_some(self.body),
        })
    }
}
