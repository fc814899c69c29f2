use std::fmt::Display;
use std::future::Future;
use std::net::SocketAddr;

use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::app::{router, AppState};
use crate::config::{AppConfig, StoreBackend};

/// Flags override the environment-derived configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Document store backend (postgres | memory)
    #[arg(long)]
    pub backend: Option<StoreBackend>,
}

impl ServeArgs {
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(backend) = self.backend {
            config.database.backend = backend;
        }
        config
    }
}

pub async fn handle(args: ServeArgs, config: AppConfig) -> anyhow::Result<()> {
    let config = args.apply(config);
    info!("Starting Collectibles API in {:?} mode", config.environment);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.server.host, config.server.port))?;

    let state = AppState::connect(config)
        .await
        .context("failed to open document store")?;
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Collectibles API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = until_signal("Ctrl+C", signal::ctrl_c());

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => until_signal("SIGTERM", async { Err::<(), _>(e) }).await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Resolve when the signal arrives; a handler that cannot be installed never resolves
async fn until_signal<F, E>(name: &str, installed: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(e) = installed.await {
        tracing::error!("Failed to install {} handler: {}", name, e);
        std::future::pending::<()>().await;
    }
}
