//! HTTP API Client
//!
//! Functions for communicating with the MedSpace REST API.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::*;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082/api/v1";

const API_URL_KEY: &str = "medspace_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, &normalize_base(url));
        }
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// The server root, used for `/health`
fn server_root(api_base: &str) -> String {
    api_base
        .strip_suffix("/api/v1")
        .unwrap_or(api_base)
        .to_string()
}

/// Build `?a=1&b=2`, skipping empty values
pub fn query_string(params: &[(&str, &str)]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v.trim())))
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// A failed call, with the server's error code when it sent one
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    pub code: Option<String>,
    pub message: String,
}

impl ApiFailure {
    fn network(e: impl std::fmt::Display) -> Self {
        Self {
            code: None,
            message: format!("Network error: {}", e),
        }
    }

    pub fn is_missing_information(&self) -> bool {
        self.code.as_deref() == Some("MISSING_INFORMATION")
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

async fn read_failure(response: Response, fallback: &str) -> ApiFailure {
    match response.json::<ApiErrorBody>().await {
        Ok(body) => ApiFailure {
            code: Some(body.error.code),
            message: body.error.message,
        },
        Err(_) => ApiFailure {
            code: None,
            message: fallback.to_string(),
        },
    }
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}{}", api_base, path))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(read_failure(response, "Request failed").await.message);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiFailure> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}{}", api_base, path))
        .json(body)
        .map_err(|e| ApiFailure {
            code: None,
            message: format!("Request build error: {}", e),
        })?
        .send()
        .await
        .map_err(ApiFailure::network)?;

    if !response.ok() {
        return Err(read_failure(response, "Request failed").await);
    }

    response.json().await.map_err(|e| ApiFailure {
        code: None,
        message: format!("Parse error: {}", e),
    })
}

// ============ Marketplace ============

pub async fn fetch_hospitals(query: &str) -> Result<Vec<Hospital>, String> {
    let path = format!("/hospitals{}", query_string(&[("q", query)]));
    let list: ListResponse<Hospital> = get_json(&path).await?;
    Ok(list.items)
}

/// Facility search form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilityQuery {
    pub q: String,
    pub facility_type: String,
    pub location: String,
    pub min_price: String,
    pub max_price: String,
}

impl FacilityQuery {
    pub fn to_query_string(&self) -> String {
        query_string(&[
            ("q", &self.q),
            ("type", &self.facility_type),
            ("location", &self.location),
            ("min_price", &self.min_price),
            ("max_price", &self.max_price),
        ])
    }
}

pub async fn fetch_facilities(query: &FacilityQuery) -> Result<Vec<Facility>, String> {
    let path = format!("/facilities{}", query.to_query_string());
    let list: ListResponse<Facility> = get_json(&path).await?;
    Ok(list.items)
}

/// Equipment search form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentQuery {
    pub q: String,
    pub category: String,
    pub location: String,
}

impl EquipmentQuery {
    pub fn to_query_string(&self) -> String {
        query_string(&[
            ("q", &self.q),
            ("category", &self.category),
            ("location", &self.location),
        ])
    }
}

pub async fn fetch_equipment(query: &EquipmentQuery) -> Result<Vec<Equipment>, String> {
    let path = format!("/equipment{}", query.to_query_string());
    let list: ListResponse<Equipment> = get_json(&path).await?;
    Ok(list.items)
}

// ============ Pharma ============

pub async fn fetch_hcps(query: &str) -> Result<Vec<Hcp>, String> {
    let path = format!("/hcps{}", query_string(&[("q", query)]));
    let list: ListResponse<Hcp> = get_json(&path).await?;
    Ok(list.items)
}

pub async fn fetch_visits(query: &str) -> Result<Vec<Visit>, String> {
    let path = format!("/visits{}", query_string(&[("q", query)]));
    let list: ListResponse<Visit> = get_json(&path).await?;
    Ok(list.items)
}

pub async fn fetch_tasks(query: &str) -> Result<Vec<Task>, String> {
    let path = format!("/tasks{}", query_string(&[("q", query)]));
    let list: ListResponse<Task> = get_json(&path).await?;
    Ok(list.items)
}

pub async fn fetch_products(query: &str, category: &str) -> Result<ProductListResponse, String> {
    let path = format!(
        "/products{}",
        query_string(&[("q", query), ("category", category)])
    );
    get_json(&path).await
}

pub async fn fetch_dashboard() -> Result<Dashboard, String> {
    get_json("/dashboard").await
}

// ============ Bookings ============

/// Body of `POST /bookings`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub item_type: String,
    pub item_id: u32,
    pub booking_date: String,
    pub start_time: String,
    pub duration: u32,
}

pub async fn fetch_bookings() -> Result<BookingListResponse, String> {
    get_json("/bookings").await
}

pub async fn create_booking(booking: &NewBooking) -> Result<Booking, ApiFailure> {
    post_json("/bookings", booking).await
}

pub async fn cancel_booking(id: i64) -> Result<Booking, String> {
    post_json(&format!("/bookings/{}/cancel", id), &serde_json::json!({}))
        .await
        .map_err(|e| e.message)
}

/// Download bookings as text in the given format (csv or json)
pub async fn export_bookings(format: &str) -> Result<String, String> {
    let api_base = get_api_base();
    let url = format!("{}/bookings/export{}", api_base, query_string(&[("format", format)]));

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(read_failure(response, "Export failed").await.message);
    }

    response
        .text()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Check API health
pub async fn check_health() -> Result<HealthResponse, String> {
    let url = format!("{}/health", server_root(&get_api_base()));

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Health check failed: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
