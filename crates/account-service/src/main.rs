//! Account service entry point.

use std::sync::Arc;

use account_service::{AccountService, Config};
use account_store::{Database, InMemoryAccountStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let service = match &config.database_url {
        Some(url) => {
            let db = Database::connect(url, config.max_connections)
                .await
                .expect("failed to connect to database");
            db.run_migrations().await.expect("migrations failed");
            tracing::info!(max_connections = config.max_connections, "using PostgreSQL store");
            AccountService::with_postgres(db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            AccountService::in_memory(InMemoryAccountStore::new())
        }
    };

    let app = account_service::create_app(Arc::new(service), metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting account service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("account service shut down gracefully");
}
