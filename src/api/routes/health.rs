//! Health checks for process supervisors and the settings page "Test" button.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready: 503 while persisted bookings are unreadable
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match count_bookings(&state).await {
        Some(_) => StatusCode::OK,
        None => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let bookings = count_bookings(&state).await;
    let (status, storage) = match bookings {
        Some(_) => ("healthy", "ok"),
        None => ("degraded", "error"),
    };

    Json(HealthResponse {
        status: status.to_string(),
        storage: storage.to_string(),
        backend: state.bookings.backend().to_string(),
        bookings,
        websocket_connections: state.ws_connection_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Number of stored bookings, or None when the array cannot be loaded
async fn count_bookings(state: &AppState) -> Option<usize> {
    state
        .bookings
        .list()
        .await
        .map(|bookings| bookings.len())
        .map_err(|e| tracing::warn!(error = %e, "Booking storage check failed"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use crate::booking::{BookingStore, BOOKINGS_KEY};
    use crate::catalog::Catalog;
    use crate::storage::{KeyValueStore, MemoryStore};

    async fn state_with(raw: Option<&str>) -> Arc<AppState> {
        let kv = Arc::new(MemoryStore::new());
        if let Some(raw) = raw {
            kv.set(BOOKINGS_KEY, raw).await.unwrap();
        }
        Arc::new(AppState::new(
            Arc::new(Catalog::seeded()),
            Arc::new(BookingStore::new(kv)),
            ApiConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_liveness() {
        assert_eq!(liveness().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_store_is_healthy() {
        let state = state_with(None).await;
        let Json(health) = full_health(State(Arc::clone(&state))).await;

        assert_eq!(health.status, "healthy");
        assert_eq!(health.backend, "memory");
        assert_eq!(health.bookings, Some(0));
        assert_eq!(readiness(State(state)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_corrupt_store_is_degraded() {
        let state = state_with(Some("{not json")).await;
        let Json(health) = full_health(State(Arc::clone(&state))).await;

        assert_eq!(health.status, "degraded");
        assert_eq!(health.storage, "error");
        assert_eq!(health.bookings, None);
        assert_eq!(readiness(State(state)).await, StatusCode::SERVICE_UNAVAILABLE);
    }
}
