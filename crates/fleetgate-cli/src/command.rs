use clap::{arg, Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: Subcommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Subcommands {
    /// Serve the gateway
    Run(SubcommandRun),
}

#[derive(Args, Debug, Clone)]
pub struct SubcommandRun {
    #[arg(short, long = "config", env = "FLEETGATE_CONFIG_FILE")]
    pub configfile: Option<PathBuf>,

    #[arg(short, long = "log-filter", env = "FLEETGATE_LOG_FILTER")]
    pub log_filter: Option<String>,

    #[arg(long = "prometheus", env = "FLEETGATE_PROMETHEUS")]
    pub prometheus: Option<bool>,

    #[arg(long = "health-check", env = "FLEETGATE_HEALTH_CHECK")]
    pub health_check: Option<bool>,

    /// Falls back to the config file, then to 0.0.0.0:8080
    #[arg(long = "addr", env = "FLEETGATE_SERVER_ADDR")]
    pub addr: Option<SocketAddr>,

    #[arg(long = "body-limit", env = "FLEETGATE_BODY_LIMIT")]
    pub body_limit: Option<usize>,

    #[arg(long = "proxy-timeout", env = "FLEETGATE_PROXY_TIMEOUT_SECS")]
    pub proxy_timeout_secs: Option<u64>,

    #[arg(long = "accept-invalid-certs", env = "FLEETGATE_ACCEPT_INVALID_CERTS")]
    pub accept_invalid_certs: Option<bool>,

    #[arg(long = "accounts-url", env = "FLEETGATE_ACCOUNTS_URL")]
    pub accounts_url: Option<Url>,

    #[arg(long = "identity-url", env = "FLEETGATE_IDENTITY_URL")]
    pub identity_url: Option<Url>,

    #[arg(long = "definitions-url", env = "FLEETGATE_DEFINITIONS_URL")]
    pub definitions_url: Option<Url>,

    #[arg(long = "developer-api-url", env = "FLEETGATE_DEVELOPER_API_URL")]
    pub developer_api_url: Option<Url>,

    #[arg(long = "developer-client-id", env = "FLEETGATE_DEVELOPER_CLIENT_ID")]
    pub developer_client_id: Option<String>,

    #[arg(long = "fleet-endpoint", env = "FLEETGATE_FLEET_ENDPOINT")]
    pub fleet_endpoint: Option<String>,

    #[arg(long = "fleet-api-key", env = "FLEETGATE_FLEET_API_KEY", hide_env_values = true)]
    pub fleet_api_key: Option<String>,

    #[arg(long = "fleet-region", env = "FLEETGATE_FLEET_REGION")]
    pub fleet_region: Option<i32>,

    #[arg(long = "public-client-id", env = "FLEETGATE_PUBLIC_CLIENT_ID")]
    pub public_client_id: Option<String>,

    #[arg(long = "login-url", env = "FLEETGATE_LOGIN_URL")]
    pub login_url: Option<Url>,
}
