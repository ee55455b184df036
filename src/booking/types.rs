//! Booking record types
//!
//! A `Booking` is created once from a `BookingRequest` against a resolved
//! `BookableItem` and afterwards only ever has its status flipped.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Equipment, Facility};

/// What kind of item a booking reserves
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Facility,
    Equipment,
}

impl BookingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingKind::Facility => "facility",
            BookingKind::Equipment => "equipment",
        }
    }

    /// Longest allowed duration, in `unit()`s
    pub fn max_duration(&self) -> u32 {
        match self {
            BookingKind::Facility => 12,
            BookingKind::Equipment => 30,
        }
    }

    /// Pricing unit
    pub fn unit(&self) -> &'static str {
        match self {
            BookingKind::Facility => "hours",
            BookingKind::Equipment => "days",
        }
    }
}

impl std::fmt::Display for BookingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "facility" => Ok(BookingKind::Facility),
            "equipment" => Ok(BookingKind::Equipment),
            _ => Err(format!(
                "Invalid booking type: {}. Use facility or equipment",
                s
            )),
        }
    }
}

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// A persisted reservation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Milliseconds since the epoch at creation, bumped on collision
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: BookingKind,
    pub item_id: u32,
    pub item_name: String,
    pub hospital_name: String,
    pub location: String,
    pub booking_date: NaiveDate,
    /// Start time as entered, `HH:MM`
    pub start_time: String,
    /// Hours for facilities, days for equipment
    pub duration: u32,
    /// Unit price times duration, fixed at creation
    pub total_price: u64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

/// The facility or equipment item a booking is made against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "item", rename_all = "lowercase")]
pub enum BookableItem {
    Facility(Facility),
    Equipment(Equipment),
}

impl BookableItem {
    pub fn kind(&self) -> BookingKind {
        match self {
            BookableItem::Facility(_) => BookingKind::Facility,
            BookableItem::Equipment(_) => BookingKind::Equipment,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            BookableItem::Facility(f) => f.id,
            BookableItem::Equipment(e) => e.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BookableItem::Facility(f) => &f.name,
            BookableItem::Equipment(e) => &e.name,
        }
    }

    pub fn hospital(&self) -> &str {
        match self {
            BookableItem::Facility(f) => &f.hospital,
            BookableItem::Equipment(e) => &e.hospital,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            BookableItem::Facility(f) => &f.location,
            BookableItem::Equipment(e) => &e.location,
        }
    }

    /// Price per hour (facility) or per day (equipment)
    pub fn price(&self) -> u32 {
        match self {
            BookableItem::Facility(f) => f.price,
            BookableItem::Equipment(e) => e.price,
        }
    }

    pub fn max_duration(&self) -> u32 {
        self.kind().max_duration()
    }

    pub fn unit(&self) -> &'static str {
        self.kind().unit()
    }

    /// Price for `duration` units
    pub fn total_for(&self, duration: u32) -> u64 {
        u64::from(self.price()) * u64::from(duration)
    }
}

/// Booking form submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub item_type: Option<BookingKind>,
    #[serde(default)]
    pub item_id: Option<u32>,
    #[serde(default)]
    pub booking_date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default = "default_duration")]
    pub duration: u32,
}

fn default_duration() -> u32 {
    1
}

impl BookingRequest {
    pub fn new(kind: BookingKind, item_id: u32) -> Self {
        Self {
            item_type: Some(kind),
            item_id: Some(item_id),
            booking_date: String::new(),
            start_time: String::new(),
            duration: default_duration(),
        }
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.booking_date = date.into();
        self
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.start_time = time.into();
        self
    }

    pub fn duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;

    #[test]
    fn test_kind_parse() {
        assert_eq!("Facility".parse::<BookingKind>().unwrap(), BookingKind::Facility);
        assert_eq!(" equipment ".parse::<BookingKind>().unwrap(), BookingKind::Equipment);
        assert!("room".parse::<BookingKind>().is_err());
    }

    #[test]
    fn test_bookable_item_accessors() {
        let facility = BookableItem::Facility(seed::facilities()[0].clone());
        assert_eq!(facility.kind(), BookingKind::Facility);
        assert_eq!(facility.unit(), "hours");
        assert_eq!(facility.max_duration(), 12);
        assert_eq!(facility.total_for(3), 3600);

        let equipment = BookableItem::Equipment(seed::equipment()[3].clone());
        assert_eq!(equipment.kind(), BookingKind::Equipment);
        assert_eq!(equipment.max_duration(), 30);
        assert_eq!(equipment.total_for(2), 1600);
    }

    #[test]
    fn test_booking_json_shape() {
        let booking = Booking {
            id: 1_700_000_000_000,
            kind: BookingKind::Facility,
            item_id: 1,
            item_name: "Private Operating Room Suite A".to_string(),
            hospital_name: "Memorial Hospital".to_string(),
            location: "San Francisco, CA".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
            start_time: "09:30".to_string(),
            duration: 2,
            total_price: 2400,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["type"], "facility");
        assert_eq!(json["itemName"], "Private Operating Room Suite A");
        assert_eq!(json["bookingDate"], "2024-11-02");
        assert_eq!(json["startTime"], "09:30");
        assert_eq!(json["totalPrice"], 2400);
        assert_eq!(json["status"], "confirmed");
    }

    #[test]
    fn test_request_defaults() {
        let req: BookingRequest = serde_json::from_str("{}").unwrap();
        assert!(req.item_type.is_none());
        assert!(req.booking_date.is_empty());
        assert_eq!(req.duration, 1);

        let req: BookingRequest = serde_json::from_str(
            r#"{"itemType":"equipment","itemId":2,"bookingDate":"2024-11-02","startTime":"10:00","duration":5}"#,
        )
        .unwrap();
        assert_eq!(req.item_type, Some(BookingKind::Equipment));
        assert_eq!(req.item_id, Some(2));
        assert_eq!(req.duration, 5);
    }
}
