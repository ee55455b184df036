//! MedSpace API Server
//!
//! Run with: cargo run --bin medspace-api
//!
//! # Configuration
//!
//! Settings come from the first `config.toml` found in
//! `~/.config/medspace/`, `/etc/medspace/`, or the working directory, with
//! environment overrides applied on top:
//! - `MEDSPACE_DATA_DIR`: Directory holding `medspaceBookings.json`
//! - `MEDSPACE_STORAGE_BACKEND`: `file` (default) or `memory`
//! - `MEDSPACE_API_HOST` / `MEDSPACE_API_PORT`: Bind address (default: 0.0.0.0:8082)
//! - `MEDSPACE_CORS_ORIGINS`: Comma-separated allowed origins
//! - `MEDSPACE_LOG_LEVEL`: Log level (default: info)
//! - `MEDSPACE_LOG_FORMAT`: `pretty` or `json`
//! - `RUST_LOG`: Full filter directive, takes precedence over the level

use anyhow::Context;
use medspace::api::{serve, ApiConfig, AppState};
use medspace::booking::BookingStore;
use medspace::catalog::Catalog;
use medspace::config::{Config, LoadNote, LoggingConfig, StorageBackend};
use medspace::storage::{FileStore, KeyValueStore, MemoryStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, notes) = Config::load_default();
    init_tracing(&config.logging);
    notes.iter().for_each(LoadNote::log);

    tracing::info!("Starting MedSpace API server v{}", env!("CARGO_PKG_VERSION"));

    let kv: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::File => {
            tracing::info!("Data directory: {}", config.storage.data_dir);
            let store = FileStore::open(&config.storage.data_dir)
                .await
                .with_context(|| format!("opening data directory {}", config.storage.data_dir))?;
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; bookings will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let catalog = Arc::new(Catalog::seeded());
    tracing::info!(
        hospitals = catalog.hospitals.len(),
        facilities = catalog.facilities.len(),
        equipment = catalog.equipment.len(),
        hcps = catalog.hcps.len(),
        "Catalog loaded"
    );

    let bookings = Arc::new(BookingStore::new(kv));
    match bookings.list().await {
        Ok(existing) => tracing::info!(count = existing.len(), "Bookings loaded"),
        Err(e) => tracing::error!(error = %e, "Persisted bookings are unreadable"),
    }

    let api_config = ApiConfig::from(&config.api);
    let state = AppState::new(catalog, bookings, api_config.clone());

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("MedSpace API server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter_directive().into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
