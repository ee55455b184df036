//! Pharma Sales Routes
//!
//! Read-only CRM endpoints.
//!
//! - GET /api/v1/hcps - Healthcare professionals
//! - GET /api/v1/visits - Visits joined with their HCP
//! - GET /api/v1/tasks - Tasks with related entity and due state
//! - GET /api/v1/products - Products, by category tab
//! - GET /api/v1/dashboard - Counts and dashboard cards

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Local;
use serde::Serialize;
use std::sync::Arc;

use crate::api::dto::{
    ListResponse, ProductListResponse, ProductParams, SearchParams, TaskResponse, VisitResponse,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::booking::BookingSummary;
use crate::catalog::{
    due_state, filter_products_by_category, matches_query, product_categories, search,
    DashboardSummary, Hcp, Product,
};

/// GET /api/v1/hcps
pub async fn list_hcps(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<ListResponse<Hcp>> {
    let hcps = search(&state.catalog.hcps, params.query())
        .into_iter()
        .cloned()
        .collect();

    Json(ListResponse::new(hcps))
}

/// GET /api/v1/visits
///
/// Matches the query against HCP name and organization as well as notes and outcome.
pub async fn list_visits(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<ListResponse<VisitResponse>> {
    let catalog = &state.catalog;

    let visits = catalog
        .search_visits(params.query())
        .into_iter()
        .map(|visit| {
            let hcp = catalog.hcp(visit.hcp_id);
            VisitResponse {
                visit: visit.clone(),
                hcp_name: hcp.map(|h| h.name.clone()).unwrap_or_else(|| "Unknown HCP".to_string()),
                hcp_organization: hcp.map(|h| h.organization.clone()).unwrap_or_default(),
            }
        })
        .collect();

    Json(ListResponse::new(visits))
}

/// GET /api/v1/tasks
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<ListResponse<TaskResponse>> {
    let catalog = &state.catalog;
    let today = Local::now().date_naive();

    let tasks = search(&catalog.tasks, params.query())
        .into_iter()
        .map(|task| TaskResponse {
            related_name: catalog.related_entity_name(task),
            due_state: due_state(task, today),
            task: task.clone(),
        })
        .collect();

    Json(ListResponse::new(tasks))
}

/// GET /api/v1/products
///
/// `category` selects a tab (`all` by default); `q` searches within it.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProductParams>,
) -> Json<ProductListResponse<Product>> {
    let products = &state.catalog.products;
    let category = params.category.as_deref().unwrap_or("all");
    let query = params.q.as_deref().unwrap_or("");

    let items: Vec<Product> = filter_products_by_category(products, category)
        .into_iter()
        .filter(|p| matches_query(*p, query))
        .cloned()
        .collect();

    Json(ProductListResponse {
        total: items.len(),
        items,
        categories: product_categories(products),
    })
}

/// Dashboard response: catalog cards plus booking totals
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub catalog: DashboardSummary,
    pub bookings: BookingSummary,
}

/// GET /api/v1/dashboard
pub async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<DashboardResponse>> {
    let bookings = state.bookings.summary().await?;

    Ok(Json(DashboardResponse {
        catalog: state.catalog.dashboard(),
        bookings,
    }))
}
