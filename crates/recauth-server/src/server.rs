//! Bootstrap and serve loop.

use std::sync::Arc;
use std::time::Duration;

use recauth_auth::{CatalogClient, RecordLookup, StaticRecords, UserRoster, ValidationsManager};
use recauth_config::{Config, ConfigError, DatabaseConfig};
use recauth_core::{PROJECT_NAME, VERSION};
use recauth_store::{ConnectionManager, StoreConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::ServerError;
use crate::routes::router;
use crate::state::AppState;

/// Translate database settings into store settings.
pub fn store_config(db: &DatabaseConfig) -> Result<StoreConfig, ConfigError> {
    Ok(StoreConfig::new(db.connection_url()?)
        .max_connections(db.max_connections)
        .min_connections(db.min_connections)
        .max_connect_retries(db.max_connect_retries)
        .retry_delay(db.retry_delay())
        .db_timeout(db.db_timeout())
        .init_schema(db.init_schema))
}

/// Build handler state around an initialized connection manager.
///
/// Record lookups go to the catalog when `catalog.url` is set and to the
/// static `records.known` list otherwise.
pub fn build_state(config: &Config, db: Arc<ConnectionManager>) -> Result<AppState, ServerError> {
    let roster = UserRoster::from_entries(&config.auth.users);

    let lookup: Arc<dyn RecordLookup> = match &config.catalog.url {
        Some(url) => {
            info!(catalog = %url, "record lookups use the catalog service");
            Arc::new(CatalogClient::new(
                url.clone(),
                config.catalog.token.clone(),
                config.catalog.timeout(),
            )?)
        }
        None => {
            let records = StaticRecords::new(config.records.known.iter().cloned());
            if records.is_empty() {
                warn!("static record list is empty, every record lookup will fail");
            } else {
                info!(
                    known = records.len(),
                    "record lookups use the static record list"
                );
            }
            Arc::new(records)
        }
    };

    if roster.is_empty() {
        warn!("user roster is empty, every credential check will fail");
    } else {
        info!(users = roster.len(), "user roster loaded");
    }
    Ok(AppState::new(
        db,
        ValidationsManager::new(roster, lookup),
        config.pagination.clone(),
    ))
}

/// Run the server with a cancellation token for graceful shutdown.
///
/// Connects to the store first; failing to connect aborts startup. On
/// cancellation, in-flight requests get `server.shutdown_timeout_secs` to
/// finish, then the store is closed.
pub async fn run_with_shutdown(
    config: Config,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let db = Arc::new(ConnectionManager::new(store_config(&config.database)?)?);
    db.init().await?;
    serve_with_store(&config, db, shutdown).await
}

/// Serve on an initialized store until cancelled.
///
/// The store is shut down on every exit path, including a failure to build
/// state or to bind the listener.
pub async fn serve_with_store(
    config: &Config,
    db: Arc<ConnectionManager>,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let served = serve(config, db.clone(), &shutdown).await;

    if let Err(e) = db.shutdown().await {
        warn!(error = %e, "database shutdown failed");
    }

    served?;
    info!("server stopped");
    Ok(())
}

async fn serve(
    config: &Config,
    db: Arc<ConnectionManager>,
    shutdown: &CancellationToken,
) -> Result<(), ServerError> {
    let state = build_state(config, db)?;
    let app = router(state);

    let listener = TcpListener::bind(&config.server.listen).await?;
    info!(
        version = VERSION,
        listen = %listener.local_addr()?,
        "{PROJECT_NAME} listening"
    );

    let drain = Duration::from_secs(config.server.shutdown_timeout_secs);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .into_future();
    let mut server = std::pin::pin!(server);

    tokio::select! {
        res = &mut server => res?,
        _ = async {
            shutdown.cancelled().await;
            tokio::time::sleep(drain).await;
        } => {
            warn!(?drain, "shutdown timeout, abandoning in-flight requests");
        }
    }
    Ok(())
}
