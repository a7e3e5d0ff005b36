use axum::extract::Request;
use fleetgate_auth::DeveloperJwtService;
use fleetgate_core::{Config, Error};
use fleetgate_proxy::{Forwarder, IdentityClient};
use fleetgate_resolver::OracleRegistry;
use tower::{Layer, Service};

/// Process-wide collaborators shared by every handler.
#[derive(Clone)]
pub struct Services {
    pub registry: OracleRegistry,
    pub forwarder: Forwarder,
    pub developer: Option<DeveloperJwtService>,
    pub identity: Option<IdentityClient>,
}

impl Services {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let registry = OracleRegistry::from_config(config)?;
        fleetgate_fleet::check_endpoint(&config.fleet.endpoint)?;
        let forwarder = Forwarder::from_config(config)?;
        let developer = config
            .developer
            .as_ref()
            .map(DeveloperJwtService::new)
            .transpose()?;
        let identity = config
            .upstream
            .identity
            .clone()
            .map(|url| IdentityClient::new(forwarder.client().clone(), url));
        Ok(Self {
            registry,
            forwarder,
            developer,
            identity,
        })
    }
}

#[derive(Clone)]
pub struct ServicesLayer {
    services: Services,
}

#[derive(Clone)]
pub struct ServicesMiddleware<S> {
    inner: S,
    services: Services,
}

impl ServicesLayer {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

impl<S> Layer<S> for ServicesLayer {
    type Service = ServicesMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ServicesMiddleware {
            inner,
            services: self.services.clone(),
        }
    }
}

impl<S> Service<Request> for ServicesMiddleware<S>
where
    S: Service<Request>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn call(&mut self, mut req: Request) -> Self::Future {
        let exts = req.extensions_mut();
        exts.insert(self.services.registry.clone());
        exts.insert(self.services.forwarder.clone());
        if let Some(developer) = &self.services.developer {
            exts.insert(developer.clone());
        }
        if let Some(identity) = &self.services.identity {
            exts.insert(identity.clone());
        }
        self.inner.call(req)
    }

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }
}
