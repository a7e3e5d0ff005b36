pub mod application;
pub mod developer;
pub mod fleet;
pub mod frontend;
pub mod oracle;
pub mod proxy;
pub mod public;
pub mod server;
pub mod upstream;

use serde::{Deserialize, Serialize};

pub use application::ApplicationConfig;
pub use developer::DeveloperConfig;
pub use fleet::FleetConfig;
pub use frontend::{FrontendConfig, TurnkeyConfig};
pub use oracle::OracleConfig;
pub use proxy::ProxyConfig;
pub use public::PublicConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub application: ApplicationConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub oracles: Vec<OracleConfig>,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    pub developer: Option<DeveloperConfig>,
    #[serde(default)]
    pub fleet: FleetConfig,
    #[serde(default)]
    pub public: PublicConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}
