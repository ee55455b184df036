//! Booking Routes
//!
//! - GET /api/v1/bookings - List bookings with summary
//! - POST /api/v1/bookings - Submit a booking
//! - POST /api/v1/bookings/:id/cancel - Cancel a booking
//! - GET /api/v1/bookings/export - Download bookings as CSV or JSON

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{BookingListResponse, ExportParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::booking::{resolve_item, Booking, BookingLedger, BookingRequest};
use crate::websocket::WsEvent;

/// GET /api/v1/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BookingListResponse>> {
    let ledger = BookingLedger::from_bookings(state.bookings.list().await?);
    let summary = ledger.summary();
    let bookings = ledger.into_bookings();

    Ok(Json(BookingListResponse {
        total: bookings.len(),
        bookings,
        summary,
    }))
}

/// POST /api/v1/bookings
///
/// Returns 201 with the stored booking. A request with no item, date, or
/// start time is rejected with `MISSING_INFORMATION` and nothing is stored.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    let item = resolve_item(&state.catalog, &req)?;
    let booking = state.bookings.create(&req, item.as_ref()).await?;

    state.ws_hub.publish(WsEvent::booking_created(&booking));

    Ok((StatusCode::CREATED, Json(booking)))
}

/// POST /api/v1/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Booking>> {
    let outcome = state.bookings.cancel(id).await?;

    if outcome.changed {
        state.ws_hub.publish(WsEvent::booking_cancelled(&outcome.booking));
    }

    Ok(Json(outcome.booking))
}

/// GET /api/v1/bookings/export
pub async fn export_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let format = params.format.to_lowercase();
    let (content_type, extension) = match format.as_str() {
        "csv" => ("text/csv", "csv"),
        "json" => ("application/json", "json"),
        other => {
            return Err(ApiError::Validation(format!(
                "Unsupported export format '{}'. Use csv or json",
                other
            )))
        }
    };

    let bookings = state.bookings.list().await?;
    let body = match extension {
        "csv" => format_csv(&bookings)?,
        _ => serde_json::to_string_pretty(&bookings)
            .map_err(|e| ApiError::Internal(format!("Failed to encode bookings: {}", e)))?,
    };

    let filename = format!(
        "medspace_bookings_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    );

    tracing::info!(format = %extension, count = bookings.len(), "Exported bookings");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// Render bookings as CSV, one row per booking
pub fn format_csv(bookings: &[Booking]) -> ApiResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "id",
            "type",
            "item_id",
            "item_name",
            "hospital_name",
            "location",
            "booking_date",
            "start_time",
            "duration",
            "total_price",
            "status",
            "created_at",
        ])
        .map_err(csv_error)?;

    for b in bookings {
        writer
            .write_record([
                b.id.to_string(),
                b.kind.to_string(),
                b.item_id.to_string(),
                b.item_name.clone(),
                b.hospital_name.clone(),
                b.location.clone(),
                b.booking_date.to_string(),
                b.start_time.clone(),
                b.duration.to_string(),
                b.total_price.to_string(),
                b.status.as_str().to_string(),
                b.created_at.to_rfc3339(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV flush failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal(format!("CSV is not UTF-8: {}", e)))
}

fn csv_error(e: csv::Error) -> ApiError {
    ApiError::Internal(format!("CSV encoding failed: {}", e))
}
