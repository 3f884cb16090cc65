use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fuel_server::cache::CachedStore;
use fuel_server::config::ServerConfig;
use fuel_server::locator::Locator;
use fuel_server::store::{MemoryStore, MySqlStore, Store};
use fuel_server::web::{AppState, create_router};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().inspect_err(|e| error!("{e}"))?;

    let store: Arc<dyn Store> = match &config.database {
        Some(database) => {
            info!(max_connections = database.max_connections, "connecting to MySQL");
            let store = MySqlStore::connect(database).await?;
            if config.apply_schema {
                store.apply_schema().await?;
                info!("schema applied");
            }
            Arc::new(store)
        }
        None => {
            let store = MemoryStore::from_seed_file(&config.seed_file)?;
            info!(
                seed_file = %config.seed_file.display(),
                stations = store.station_count(),
                "DATABASE_URL not set, using in-memory store"
            );
            Arc::new(store)
        }
    };

    let store = Arc::new(CachedStore::new(store, &config.cache));
    let locator = Locator::new(store, config.locator.clone());
    let state = AppState::new(locator).with_expose_errors(config.expose_errors);
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Fuel station locator listening on http://{}", config.bind_addr);
    info!("  GET  /health              - Health check");
    info!("  GET  /get_stations        - Search stations by city or location");
    info!("  GET  /get_station_details - Station details by id");
    info!("  GET  /get_reviews         - Recent reviews");
    info!("  POST /submit_review       - Submit a review");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!("failed to install terminate handler: {e}");
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
}
