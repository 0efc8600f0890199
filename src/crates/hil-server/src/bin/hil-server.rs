//! hil-server binary
//!
//! Serves the workflow engine over HTTP until Ctrl-C or SIGTERM.

use anyhow::Context;
use clap::Parser;
use hil_server::{build_engine, create_router, sweeper, version, ServerArgs};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();
    let config = args.resolve().context("failed to load server configuration")?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        name = %config.server.name,
        version = version::VERSION,
        "Starting {}",
        version::PKG_NAME
    );

    let addr = config.bind_addr()?;
    let engine = build_engine(&config);

    let sweeper = config.eviction_policy().map(|policy| {
        tracing::info!(
            idle_ttl_secs = ?config.sessions.idle_ttl_secs,
            completed_ttl_secs = ?config.sessions.completed_ttl_secs,
            sweep_interval_secs = config.sessions.sweep_interval_secs,
            "Idle session eviction enabled"
        );
        sweeper::spawn_sweeper(engine.clone(), policy, config.sweep_interval())
    });

    let app = create_router(engine);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = sweeper {
        handle.abort();
    }

    tracing::info!("hil-server shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for CTRL-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
