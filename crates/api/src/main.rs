use std::sync::Arc;

use anyhow::Context;

use fleetreg_api::app::{AppServices, build_app};
use fleetreg_api::config::AppConfig;
use fleetreg_infra::SqliteFleetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fleetreg_observability::init();

    let config = AppConfig::from_env();

    let store = SqliteFleetStore::open(&config.database, config.timeouts)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))?;

    let app = build_app(
        Arc::new(AppServices::new(Arc::new(store.clone()))),
        config.request_timeout,
    );

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
