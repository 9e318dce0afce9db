//! scout-server binary: loads configuration, wires up the application
//! state, and serves the report API.

use anyhow::Context;
use clap::Parser;
use scout::{AppState, Config, app};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "scout-server", version, about = "Company research report server")]
struct Args {
    /// Bind address (overrides HOST from the environment)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT from the environment)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scout=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(
        addr,
        synthesis = config.synthesis.is_enabled(),
        "starting scout-server"
    );

    let state = AppState::from_config(config).map_err(|e| anyhow::anyhow!("{e}"))?;
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
