//! Marketplace Routes
//!
//! Read-only catalog endpoints for the booking side of the application.
//!
//! - GET /api/v1/hospitals - Partner hospitals
//! - GET /api/v1/facilities - Bookable spaces, filterable
//! - GET /api/v1/facilities/:id - One facility
//! - GET /api/v1/equipment - Rentable equipment, filterable
//! - GET /api/v1/equipment/:id - One equipment item

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{EquipmentParams, FacilityParams, ListResponse, SearchParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::catalog::{
    search, Equipment, EquipmentCategory, EquipmentFilter, Facility, FacilityFilter,
    FacilityType, Hospital,
};

/// GET /api/v1/hospitals
pub async fn list_hospitals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<ListResponse<Hospital>> {
    let hospitals = search(&state.catalog.hospitals, params.query())
        .into_iter()
        .cloned()
        .collect();

    Json(ListResponse::new(hospitals))
}

/// GET /api/v1/facilities
///
/// Supports `q`, `type`, `location`, `min_price`, and `max_price`.
pub async fn list_facilities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FacilityParams>,
) -> ApiResult<Json<ListResponse<Facility>>> {
    let filter = facility_filter(params)?;

    let facilities = filter
        .apply(&state.catalog.facilities)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ListResponse::new(facilities)))
}

/// GET /api/v1/facilities/:id
pub async fn get_facility(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<Json<Facility>> {
    state
        .catalog
        .facility(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Facility with id {} not found", id)))
}

/// GET /api/v1/equipment
///
/// Supports `q`, `category`, `location`, `min_price`, and `max_price`.
pub async fn list_equipment(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EquipmentParams>,
) -> ApiResult<Json<ListResponse<Equipment>>> {
    let filter = equipment_filter(params)?;

    let items = filter
        .apply(&state.catalog.equipment)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ListResponse::new(items)))
}

/// GET /api/v1/equipment/:id
pub async fn get_equipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<Json<Equipment>> {
    state
        .catalog
        .equipment_item(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Equipment with id {} not found", id)))
}

fn validate_price_band(min: Option<u32>, max: Option<u32>) -> ApiResult<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ApiError::Validation(format!(
            "min_price ({}) must not exceed max_price ({})",
            min, max
        ))),
        _ => Ok(()),
    }
}

fn facility_filter(params: FacilityParams) -> ApiResult<FacilityFilter> {
    validate_price_band(params.min_price, params.max_price)?;

    let mut filter = FacilityFilter::new().price_range(params.min_price, params.max_price);
    if let Some(q) = params.q {
        filter = filter.query(q);
    }
    if let Some(raw) = params.facility_type.filter(|t| !t.eq_ignore_ascii_case("all")) {
        let facility_type: FacilityType = raw.parse().map_err(ApiError::Validation)?;
        filter = filter.facility_type(facility_type);
    }
    if let Some(location) = params.location {
        filter = filter.location(location);
    }
    Ok(filter)
}

fn equipment_filter(params: EquipmentParams) -> ApiResult<EquipmentFilter> {
    validate_price_band(params.min_price, params.max_price)?;

    let mut filter = EquipmentFilter::new().price_range(params.min_price, params.max_price);
    if let Some(q) = params.q {
        filter = filter.query(q);
    }
    if let Some(raw) = params.category.filter(|c| !c.eq_ignore_ascii_case("all")) {
        let category: EquipmentCategory = raw.parse().map_err(ApiError::Validation)?;
        filter = filter.category(category);
    }
    if let Some(location) = params.location {
        filter = filter.location(location);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_filter_parses_type() {
        let filter = facility_filter(FacilityParams {
            facility_type: Some("imaging".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.facility_type, Some(FacilityType::Imaging));

        let all = facility_filter(FacilityParams {
            facility_type: Some("all".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(all.facility_type, None);

        assert!(facility_filter(FacilityParams {
            facility_type: Some("spa".to_string()),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_price_band_validation() {
        assert!(validate_price_band(Some(100), Some(50)).is_err());
        assert!(validate_price_band(Some(50), Some(50)).is_ok());
        assert!(validate_price_band(None, Some(50)).is_ok());

        assert!(equipment_filter(EquipmentParams {
            min_price: Some(900),
            max_price: Some(100),
            ..Default::default()
        })
        .is_err());
    }
}
