//! MedSpace REST API
//!
//! HTTP API layer for MedSpace, built with Axum.
//!
//! # Endpoints
//!
//! ## Marketplace
//! - `GET /api/v1/hospitals` - Partner hospitals (`q`)
//! - `GET /api/v1/facilities` - Facilities (`q`, `type`, `location`, `min_price`, `max_price`)
//! - `GET /api/v1/facilities/:id` - One facility
//! - `GET /api/v1/equipment` - Equipment (`q`, `category`, `location`, `min_price`, `max_price`)
//! - `GET /api/v1/equipment/:id` - One equipment item
//!
//! ## Pharma Sales
//! - `GET /api/v1/hcps` - Healthcare professionals (`q`)
//! - `GET /api/v1/visits` - Visits (`q`)
//! - `GET /api/v1/tasks` - Tasks (`q`)
//! - `GET /api/v1/products` - Products (`q`, `category`)
//! - `GET /api/v1/dashboard` - Dashboard summary
//!
//! ## Bookings
//! - `GET /api/v1/bookings` - List bookings
//! - `POST /api/v1/bookings` - Submit a booking
//! - `POST /api/v1/bookings/:id/cancel` - Cancel a booking
//! - `GET /api/v1/bookings/export` - Export (`format=csv|json`)
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health/ready` - Readiness check
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Booking events
//!
//! # Example
//!
//! ```rust,no_run
//! use medspace::api::{serve, ApiConfig, AppState};
//! use medspace::booking::BookingStore;
//! use medspace::catalog::Catalog;
//! use medspace::storage::FileStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let kv = Arc::new(FileStore::open("./medspace_data").await?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(
//!         Arc::new(Catalog::seeded()),
//!         Arc::new(BookingStore::new(kv)),
//!         config.clone(),
//!     );
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Marketplace routes
        .route("/hospitals", get(routes::marketplace::list_hospitals))
        .route("/facilities", get(routes::marketplace::list_facilities))
        .route("/facilities/:id", get(routes::marketplace::get_facility))
        .route("/equipment", get(routes::marketplace::list_equipment))
        .route("/equipment/:id", get(routes::marketplace::get_equipment))
        // Pharma routes
        .route("/hcps", get(routes::pharma::list_hcps))
        .route("/visits", get(routes::pharma::list_visits))
        .route("/tasks", get(routes::pharma::list_tasks))
        .route("/products", get(routes::pharma::list_products))
        .route("/dashboard", get(routes::pharma::dashboard))
        // Booking routes
        .route(
            "/bookings",
            get(routes::bookings::list_bookings).post(routes::bookings::create_booking),
        )
        .route("/bookings/export", get(routes::bookings::export_bookings))
        .route("/bookings/:id/cancel", post(routes::bookings::cancel_booking))
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(TimeoutLayer::new(state.config.request_timeout))
        // WebSocket route (no request timeout)
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins; any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(allowed))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("MedSpace API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("MedSpace API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingStore, BOOKINGS_KEY};
    use crate::catalog::Catalog;
    use crate::storage::{FileStore, KeyValueStore, MemoryStore};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app_with(kv: Arc<dyn KeyValueStore>) -> Router {
        let state = AppState::new(
            Arc::new(Catalog::seeded()),
            Arc::new(BookingStore::new(kv)),
            ApiConfig::default(),
        );
        build_router(state)
    }

    fn create_test_app() -> (Router, Arc<MemoryStore>) {
        let kv = Arc::new(MemoryStore::new());
        (create_test_app_with(kv.clone()), kv)
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn facility_booking() -> Value {
        json!({
            "itemType": "facility",
            "itemId": 2,
            "bookingDate": "2024-10-20",
            "startTime": "09:00",
            "duration": 3
        })
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _) = create_test_app();

        assert_eq!(get(&app, "/health/live").await.status(), StatusCode::OK);
        assert_eq!(get(&app, "/health/ready").await.status(), StatusCode::OK);

        let response = get(&app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend"], "memory");
    }

    #[tokio::test]
    async fn test_list_facilities_with_filters() {
        let (app, _) = create_test_app();

        let body = body_json(get(&app, "/api/v1/facilities").await).await;
        assert_eq!(body["total"], 5);

        let body = body_json(get(&app, "/api/v1/facilities?type=imaging").await).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["name"], "Imaging Center - MRI Unit");
        assert_eq!(body["items"][0]["type"], "imaging");

        let body = body_json(get(&app, "/api/v1/facilities?max_price=800").await).await;
        assert_eq!(body["total"], 3);

        let response = get(&app, "/api/v1/facilities?type=spa").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_endpoints() {
        let (app, _) = create_test_app();

        let body = body_json(get(&app, "/api/v1/equipment?q=LASER").await).await;
        assert_eq!(body["total"], 1);

        let body = body_json(get(&app, "/api/v1/hospitals?q=zzz").await).await;
        assert_eq!(body["total"], 0);

        let body = body_json(get(&app, "/api/v1/tasks").await).await;
        assert!(body["items"][0]["relatedName"].is_string());
        assert!(body["items"][0]["dueState"].is_string());

        let body = body_json(get(&app, "/api/v1/visits").await).await;
        assert!(body["items"][0]["hcpName"].is_string());

        let body = body_json(get(&app, "/api/v1/products?category=all").await).await;
        assert_eq!(body["total"], 6);
        assert!(body["categories"].as_array().unwrap().len() > 1);
    }

    #[tokio::test]
    async fn test_get_facility_not_found() {
        let (app, _) = create_test_app();

        assert_eq!(get(&app, "/api/v1/facilities/1").await.status(), StatusCode::OK);

        let response = get(&app, "/api/v1/facilities/99").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_create_booking() {
        let (app, kv) = create_test_app();

        let response = post_json(&app, "/api/v1/bookings", facility_booking()).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["totalPrice"], 2400);
        assert_eq!(body["status"], "confirmed");
        assert_eq!(body["hospitalName"], "City Medical Center");

        let raw = kv.get(BOOKINGS_KEY).await.unwrap().unwrap();
        let stored: Vec<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);

        let list = body_json(get(&app, "/api/v1/bookings").await).await;
        assert_eq!(list["total"], 1);
        assert_eq!(list["summary"]["confirmedRevenue"], 2400);
    }

    #[tokio::test]
    async fn test_create_booking_missing_information() {
        let (app, kv) = create_test_app();

        let mut request = facility_booking();
        request["bookingDate"] = json!("");
        let response = post_json(&app, "/api/v1/bookings", request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_INFORMATION");

        let response = post_json(&app, "/api/v1/bookings", json!({"bookingDate": "2024-10-20"})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(kv.get(BOOKINGS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_booking_validation() {
        let (app, _) = create_test_app();

        let mut request = facility_booking();
        request["duration"] = json!(13);
        let response = post_json(&app, "/api/v1/bookings", request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");

        let mut request = facility_booking();
        request["itemId"] = json!(404);
        let response = post_json(&app, "/api/v1/bookings", request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cancel_booking() {
        let (app, _) = create_test_app();

        let created = body_json(post_json(&app, "/api/v1/bookings", facility_booking()).await).await;
        let id = created["id"].as_i64().unwrap();

        let response = post_json(&app, &format!("/api/v1/bookings/{}/cancel", id), json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cancelled = body_json(response).await;
        assert_eq!(cancelled["status"], "cancelled");
        assert_eq!(cancelled["totalPrice"], created["totalPrice"]);

        let response = post_json(&app, "/api/v1/bookings/1/cancel", json!({})).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_repeat_cancel_publishes_once() {
        let state = AppState::new(
            Arc::new(Catalog::seeded()),
            Arc::new(BookingStore::new(Arc::new(MemoryStore::new()))),
            ApiConfig::default(),
        );
        let hub = Arc::clone(&state.ws_hub);
        let app = build_router(state);

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();
        hub.subscribe(&id, vec!["bookings".to_string()]).await.unwrap();

        let created = body_json(post_json(&app, "/api/v1/bookings", facility_booking()).await).await;
        let uri = format!("/api/v1/bookings/{}/cancel", created["id"]);
        for _ in 0..2 {
            let response = post_json(&app, &uri, json!({})).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await["status"], "cancelled");
        }

        let mut cancelled_events = 0;
        while let Ok(Some(message)) =
            tokio::time::timeout(std::time::Duration::from_millis(200), rx.recv()).await
        {
            if matches!(message, crate::websocket::ServerMessage::BookingCancelled { .. }) {
                cancelled_events += 1;
            }
        }
        assert_eq!(cancelled_events, 1);
    }

    #[tokio::test]
    async fn test_export_bookings() {
        let (app, _) = create_test_app();
        post_json(&app, "/api/v1/bookings", facility_booking()).await;

        let response = get(&app, "/api/v1/bookings/export?format=csv").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "text/csv"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(text.lines().count(), 2);

        let response = get(&app, "/api/v1/bookings/export?format=xml").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard() {
        let (app, _) = create_test_app();

        let body = body_json(get(&app, "/api/v1/dashboard").await).await;
        assert_eq!(body["facilityCount"], 5);
        assert_eq!(body["upcomingVisits"].as_array().unwrap().len(), 4);
        assert_eq!(body["bookings"]["total"], 0);
    }

    #[tokio::test]
    async fn test_corrupt_bookings_reported() {
        let (app, kv) = create_test_app();
        kv.set(BOOKINGS_KEY, "not json").await.unwrap();

        let response = get(&app, "/api/v1/bookings").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "STORAGE_CORRUPTION");

        assert_eq!(
            get(&app, "/health/ready").await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_file_backed_app_persists() {
        let dir = tempdir().unwrap();
        let kv = Arc::new(FileStore::open(dir.path()).await.unwrap());
        let app = create_test_app_with(kv);

        let response = post_json(&app, "/api/v1/bookings", facility_booking()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(dir.path().join("medspaceBookings.json").exists());
    }
}
