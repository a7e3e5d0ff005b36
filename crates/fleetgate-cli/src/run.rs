use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use anyhow::{Context, Result};
use axum::Router;
use figment::{
    providers::{Format, Json as FigmentJson, Serialized},
    Figment, Profile,
};
use fleetgate_core::Config;
use fleetgate_svr::router;
use serde_json::json;
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::utils::clean_json;

use super::command::SubcommandRun;

const DEFAULT_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);

pub async fn run(cli: &SubcommandRun, dotenv: Option<PathBuf>) -> Result<()> {
    let config = load_config(cli)?;

    let env_filter = config
        .application
        .log_filter
        .as_deref()
        .unwrap_or("info")
        .parse::<EnvFilter>()
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(env_filter)
        .init();
    if let Some(path) = dotenv {
        tracing::info!("loaded environment from {}", path.display());
    }
    tracing::info!("{}", serde_json::to_string_pretty(&config)?);

    let cancel = CancellationToken::new();
    let listener = TcpListener::bind(config.server.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.addr))?;
    tracing::info!("Server started at: {}", config.server.addr);
    let app = router(config).context("Failed to build router")?;

    tokio::spawn(shutdown_signal(cancel.clone()));
    serve(listener, app, cancel).await
}

/// Serves until `cancel` fires, then drains in-flight requests.
async fn serve(listener: TcpListener, app: Router, cancel: CancellationToken) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

fn load_config(cli: &SubcommandRun) -> Result<Config> {
    let configfile = cli.configfile.clone().map(FigmentJson::file);
    Figment::new()
        .merge(Serialized::defaults(json!({ "server": { "addr": DEFAULT_ADDR } })))
        .merge(configfile.unwrap_or(FigmentJson::string("{}")))
        .merge(figment_merge(cli)?)
        .extract()
        .context("Failed to load configuration")
}

async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down...");
    cancel.cancel();
}

fn figment_merge(cli: &SubcommandRun) -> Result<Serialized<figment::value::Value>> {
    let result = json!({
        "application": {
            "log_filter": cli.log_filter,
            "prometheus": cli.prometheus,
            "health_check": cli.health_check,
        },
        "server": {
            "addr": cli.addr,
            "body_limit": cli.body_limit,
        },
        "proxy": {
            "timeout_secs": cli.proxy_timeout_secs,
            "accept_invalid_certs": cli.accept_invalid_certs,
        },
        "upstream": {
            "accounts": cli.accounts_url,
            "identity": cli.identity_url,
            "definitions": cli.definitions_url,
        },
        "developer": {
            "api_url": cli.developer_api_url,
            "client_id": cli.developer_client_id,
        },
        "fleet": {
            "endpoint": cli.fleet_endpoint,
            "api_key": cli.fleet_api_key,
            "region": cli.fleet_region,
        },
        "public": {
            "client_id": cli.public_client_id,
            "login_url": cli.login_url,
        },
    });

    let figment_value: figment::value::Value = serde_json::from_value(clean_json(result))?;
    Ok(Serialized::from(figment_value, Profile::Default))
}
