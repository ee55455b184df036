//! Response types
//!
//! Mirrors of the server's JSON records. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub facilities_count: u32,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: u32,
    pub name: String,
    pub hospital: String,
    pub location: String,
    #[serde(rename = "type")]
    pub facility_type: String,
    pub price: u32,
    pub image: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: u32,
    pub name: String,
    pub hospital: String,
    pub location: String,
    pub category: String,
    pub price: u32,
    pub image: String,
    pub features: Vec<String>,
    pub description: String,
    pub availability: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hcp {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub organization: String,
    pub city: String,
    pub state: String,
    pub rating: u8,
    pub potential_value: u64,
}

/// A visit joined with its HCP
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: u32,
    pub date: String,
    pub hcp_id: u32,
    pub products_discussed: Vec<String>,
    pub notes: String,
    #[serde(default)]
    pub follow_up_date: Option<String>,
    pub outcome: String,
    pub status: String,
    #[serde(default)]
    pub hcp_name: String,
    #[serde(default)]
    pub hcp_organization: String,
}

/// A task with its resolved relation and due state
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub related_name: String,
    #[serde(default)]
    pub due_state: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub active_ingredient: String,
    pub indications: Vec<String>,
    pub launch_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub item_id: u32,
    pub item_name: String,
    pub hospital_name: String,
    pub location: String,
    pub booking_date: String,
    pub start_time: String,
    pub duration: u32,
    pub total_price: u64,
    pub status: String,
    pub created_at: String,
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.status == "confirmed"
    }

    /// "3 hours", "1 day"
    pub fn duration_label(&self) -> String {
        let unit = if self.kind == "equipment" { "day" } else { "hour" };
        let plural = if self.duration > 1 { "s" } else { "" };
        format!("{} {}{}", self.duration, unit, plural)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub total: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub confirmed_revenue: u64,
}

#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct ProductListResponse {
    pub items: Vec<Product>,
    pub total: usize,
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
    pub total: usize,
    pub summary: BookingSummary,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub hospital_count: usize,
    pub facility_count: usize,
    pub equipment_count: usize,
    pub hcp_count: usize,
    pub upcoming_visits: Vec<DashboardVisit>,
    pub pending_tasks: Vec<DashboardTask>,
    pub top_hcps: Vec<Hcp>,
    pub bookings: BookingSummary,
}

/// Visits on the dashboard come without the HCP join
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardVisit {
    pub id: u32,
    pub date: String,
    pub hcp_id: u32,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTask {
    pub id: u32,
    pub title: String,
    pub due_date: String,
    pub priority: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub backend: String,
    #[serde(default)]
    pub bookings: Option<usize>,
    pub websocket_connections: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Error envelope: `{ "error": { "code", "message" }, "request_id" }`
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_from_server_json() {
        let json = r#"{
            "id": 1729080000000,
            "type": "equipment",
            "itemId": 2,
            "itemName": "Surgical Robot System",
            "hospitalName": "City Medical Center",
            "location": "Los Angeles, CA",
            "bookingDate": "2024-11-01",
            "startTime": "09:00",
            "duration": 3,
            "totalPrice": 1500,
            "status": "confirmed",
            "createdAt": "2024-10-16T12:00:00Z"
        }"#;

        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.kind, "equipment");
        assert!(booking.is_confirmed());
        assert_eq!(booking.duration_label(), "3 days");
    }

    #[test]
    fn test_duration_label_singular() {
        let booking = Booking {
            id: 1,
            kind: "facility".to_string(),
            item_id: 1,
            item_name: "Suite".to_string(),
            hospital_name: "Memorial Hospital".to_string(),
            location: "San Francisco, CA".to_string(),
            booking_date: "2024-11-01".to_string(),
            start_time: "09:00".to_string(),
            duration: 1,
            total_price: 1200,
            status: "cancelled".to_string(),
            created_at: String::new(),
        };
        assert_eq!(booking.duration_label(), "1 hour");
        assert!(!booking.is_confirmed());
    }

    #[test]
    fn test_error_envelope() {
        let json = r#"{"error":{"code":"MISSING_INFORMATION","message":"Missing information"},"request_id":"abc"}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.code, "MISSING_INFORMATION");
    }
}
