use std::sync::Arc;

use fleetgate_core::{Config, Error, ProxyConfig};
use httpbuilder::{
    builder::{HttpBuilder, ProxiedRequest},
    errors::HttpBuilderError,
    http_reference::HttpReference,
};
use url::Url;

use crate::RelayedResponse;

/// Sends proxied requests upstream and buffers the answer for relaying.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    log_context: Arc<Vec<HttpReference>>,
}

impl Forwarder {
    pub fn new(config: &ProxyConfig, log_context: Vec<HttpReference>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            // connections are not reused between requests
            .pool_max_idle_per_host(0)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| HttpBuilderError::Client(Box::new(e)))?;
        if config.accept_invalid_certs {
            tracing::warn!("upstream certificate verification is disabled");
        }
        Ok(Self {
            client,
            log_context: Arc::new(log_context),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(&config.proxy, config.application.log_context.clone())
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Forwards the inbound request to `target`, keeping method, headers, raw query and body.
    pub async fn forward(
        &self,
        src: &http::request::Parts,
        target: Url,
        body: impl Into<Vec<u8>>,
        override_auth: Option<&str>,
    ) -> Result<RelayedResponse, Error> {
        let mut builder = HttpBuilder::new(src, target)?.inbound_query().body(body);
        if let Some(auth) = override_auth {
            builder = builder.override_auth(auth);
        }
        let request = builder.build()?;
        tracing::info!(
            method = %request.method,
            target = %request.target,
            context = %self.render_context(src),
            "proxying request"
        );
        self.send(request).await
    }

    pub async fn send(&self, request: ProxiedRequest) -> Result<RelayedResponse, Error> {
        let ProxiedRequest {
            method,
            target,
            headers,
            body,
        } = request;

        let mut outbound = self
            .client
            .request(method, target.clone())
            .headers(headers);
        if let Some(body) = body {
            outbound = outbound.body(body);
        }
        let outbound = outbound
            .build()
            .map_err(|e| HttpBuilderError::Client(Box::new(e)))?;

        let response = self
            .client
            .execute(outbound)
            .await
            .map_err(|source| Error::UpstreamUnreachable {
                target: target.clone(),
                source,
            })?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| Error::ResponseRead {
                target: target.clone(),
                source,
            })?;
        tracing::debug!(target = %target, status = status.as_u16(), bytes = body.len(), "upstream responded");

        Ok(RelayedResponse {
            status,
            headers,
            body,
        })
    }

    fn render_context(&self, src: &http::request::Parts) -> String {
        self.log_context
            .iter()
            .map(|reference| {
                let value = httpbuilder::resolve(reference, src).unwrap_or_default();
                format!("{}={}", reference.name(), value)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
