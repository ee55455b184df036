//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::booking::{Booking, BookingSummary};
use crate::catalog::{DueState, Task, Visit};

// ============================================
// CATALOG DTOs
// ============================================

/// Free-text search parameter shared by the simple list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchParams {
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

/// Facility list parameters
#[derive(Debug, Default, Deserialize)]
pub struct FacilityParams {
    #[serde(default)]
    pub q: Option<String>,
    /// Facility type, e.g. `imaging` or `operating_room`
    #[serde(default, rename = "type")]
    pub facility_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub min_price: Option<u32>,
    #[serde(default)]
    pub max_price: Option<u32>,
}

/// Equipment list parameters
#[derive(Debug, Default, Deserialize)]
pub struct EquipmentParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub min_price: Option<u32>,
    #[serde(default)]
    pub max_price: Option<u32>,
}

/// Product list parameters
#[derive(Debug, Default, Deserialize)]
pub struct ProductParams {
    #[serde(default)]
    pub q: Option<String>,
    /// Category tab; `all` or absent selects everything
    #[serde(default)]
    pub category: Option<String>,
}

/// Generic list envelope
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Product list with the category tabs
#[derive(Debug, Serialize)]
pub struct ProductListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
    pub categories: Vec<String>,
}

/// A visit joined with its HCP
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitResponse {
    #[serde(flatten)]
    pub visit: Visit,
    pub hcp_name: String,
    pub hcp_organization: String,
}

/// A task with its resolved relation and due state
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    #[serde(flatten)]
    pub task: Task,
    pub related_name: String,
    pub due_state: DueState,
}

// ============================================
// BOOKING DTOs
// ============================================

/// Booking list response
#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
    pub total: usize,
    pub summary: BookingSummary,
}

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Format: json, csv
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "json".to_string()
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    /// `ok` or `error`
    pub storage: String,
    /// `file` or `memory`
    pub backend: String,
    /// Persisted bookings, absent when they cannot be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<usize>,
    pub websocket_connections: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
