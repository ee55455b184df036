//! What every handler can reach: the catalog, the booking store, the event
//! hub, and the server limits.

use crate::booking::BookingStore;
use crate::catalog::Catalog;
use crate::websocket::{ConnectionHub, HubConfig};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub bookings: Arc<BookingStore>,
    pub ws_hub: Arc<ConnectionHub>,
    pub config: Arc<ApiConfig>,
    started_at: Instant,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, bookings: Arc<BookingStore>, config: ApiConfig) -> Self {
        Self {
            catalog,
            bookings,
            ws_hub: Arc::new(ConnectionHub::new(HubConfig::default())),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Replace the hub with one using different socket limits
    pub fn with_hub_limits(mut self, limits: HubConfig) -> Self {
        self.ws_hub = Arc::new(ConnectionHub::new(limits));
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }
}

/// Runtime settings for the HTTP server, derived from `[api]` in the config file
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Applied to every route except the WebSocket upgrade
    pub request_timeout: Duration,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
    /// Booking requests are tiny; anything bigger is rejected
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        (&crate::config::ApiConfig::default()).into()
    }
}

impl ApiConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<&crate::config::ApiConfig> for ApiConfig {
    fn from(config: &crate::config::ApiConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            cors_origins: config.cors_origins.clone(),
            max_body_size: 64 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_follow_config_file_defaults() {
        let api = ApiConfig::default();
        assert_eq!(api.addr(), "0.0.0.0:8082");
        assert_eq!(api.request_timeout, Duration::from_secs(30));
        assert!(api.cors_origins.iter().any(|o| o == "http://localhost:8084"));
    }

    #[tokio::test]
    async fn test_hub_limits_replace_hub() {
        let state = AppState::new(
            Arc::new(Catalog::seeded()),
            Arc::new(BookingStore::new(Arc::new(MemoryStore::new()))),
            ApiConfig::default(),
        )
        .with_hub_limits(HubConfig { max_connections: 1 });

        let (tx1, _rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, _rx2) = tokio::sync::mpsc::unbounded_channel();
        assert!(state.ws_hub.register(tx1).await.is_ok());
        assert!(state.ws_hub.register(tx2).await.is_err());
        assert_eq!(state.ws_connection_count().await, 1);
    }
}
