//! Booking selection handoff
//!
//! "Book Now" on a facility and "Rent Now" on an equipment item stash the
//! record in session storage, then navigate to `/my-bookings`. The booking
//! form reads it once and clears it on submit or cancel. At most one
//! selection exists; writing one removes the other.

use crate::api::{Equipment, Facility, NewBooking};

pub const FACILITY_KEY: &str = "selectedFacility";
pub const EQUIPMENT_KEY: &str = "selectedEquipment";

/// The item the booking form is for
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Facility(Facility),
    Equipment(Equipment),
}

impl Selection {
    pub fn storage_key(&self) -> &'static str {
        match self {
            Selection::Facility(_) => FACILITY_KEY,
            Selection::Equipment(_) => EQUIPMENT_KEY,
        }
    }

    /// Wire name of the booking type
    pub fn kind(&self) -> &'static str {
        match self {
            Selection::Facility(_) => "facility",
            Selection::Equipment(_) => "equipment",
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Selection::Facility(f) => f.id,
            Selection::Equipment(e) => e.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Selection::Facility(f) => &f.name,
            Selection::Equipment(e) => &e.name,
        }
    }

    pub fn hospital(&self) -> &str {
        match self {
            Selection::Facility(f) => &f.hospital,
            Selection::Equipment(e) => &e.hospital,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Selection::Facility(f) => &f.location,
            Selection::Equipment(e) => &e.location,
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            Selection::Facility(f) => f.price,
            Selection::Equipment(e) => e.price,
        }
    }

    pub fn is_equipment(&self) -> bool {
        matches!(self, Selection::Equipment(_))
    }

    /// "hr" or "day", for price labels
    pub fn rate_unit(&self) -> &'static str {
        if self.is_equipment() {
            "day"
        } else {
            "hr"
        }
    }

    /// "hours" or "days", for the duration field
    pub fn duration_unit(&self) -> &'static str {
        if self.is_equipment() {
            "days"
        } else {
            "hours"
        }
    }

    pub fn max_duration(&self) -> u32 {
        if self.is_equipment() {
            30
        } else {
            12
        }
    }

    pub fn total_for(&self, duration: u32) -> u64 {
        u64::from(self.price()) * u64::from(duration)
    }

    fn encode(&self) -> Result<String, serde_json::Error> {
        match self {
            Selection::Facility(f) => serde_json::to_string(f),
            Selection::Equipment(e) => serde_json::to_string(e),
        }
    }

    /// Rebuild a selection from the two stored values; a facility wins
    pub fn decode(facility: Option<&str>, equipment: Option<&str>) -> Option<Selection> {
        if let Some(facility) = facility.and_then(|raw| serde_json::from_str(raw).ok()) {
            return Some(Selection::Facility(facility));
        }
        equipment
            .and_then(|raw| serde_json::from_str(raw).ok())
            .map(Selection::Equipment)
    }
}

/// Parse the duration input the way a number field behaves: junk or zero is 1
pub fn parse_duration(raw: &str, max: u32) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|d| *d > 0)
        .unwrap_or(1)
        .min(max)
}

/// True when the form cannot be submitted
pub fn missing_information(selection: Option<&Selection>, date: &str, time: &str) -> bool {
    selection.is_none() || date.trim().is_empty() || time.trim().is_empty()
}

/// Request body for a complete form
pub fn booking_request(selection: &Selection, date: &str, time: &str, duration: u32) -> NewBooking {
    NewBooking {
        item_type: selection.kind().to_string(),
        item_id: selection.id(),
        booking_date: date.trim().to_string(),
        start_time: time.trim().to_string(),
        duration,
    }
}

fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.session_storage().ok().flatten())
}

/// Remember the item the user wants to book
pub fn store(selection: &Selection) {
    let Some(storage) = session_storage() else {
        return;
    };
    let Ok(json) = selection.encode() else {
        return;
    };

    let _ = storage.remove_item(FACILITY_KEY);
    let _ = storage.remove_item(EQUIPMENT_KEY);
    let _ = storage.set_item(selection.storage_key(), &json);
}

/// Read the stored selection, if any
pub fn load() -> Option<Selection> {
    let storage = session_storage()?;
    let facility = storage.get_item(FACILITY_KEY).ok().flatten();
    let equipment = storage.get_item(EQUIPMENT_KEY).ok().flatten();
    Selection::decode(facility.as_deref(), equipment.as_deref())
}

pub fn clear() {
    if let Some(storage) = session_storage() {
        let _ = storage.remove_item(FACILITY_KEY);
        let _ = storage.remove_item(EQUIPMENT_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility() -> Facility {
        Facility {
            id: 2,
            name: "Imaging Center - MRI Unit".to_string(),
            hospital: "City Medical Center".to_string(),
            location: "Los Angeles, CA".to_string(),
            facility_type: "imaging".to_string(),
            price: 800,
            image: "/placeholder.svg".to_string(),
            features: vec!["3T MRI Machine".to_string()],
        }
    }

    fn equipment() -> Equipment {
        Equipment {
            id: 1,
            name: "Portable Ultrasound Machine".to_string(),
            hospital: "Memorial Hospital".to_string(),
            location: "San Francisco, CA".to_string(),
            category: "diagnostic".to_string(),
            price: 350,
            image: "/placeholder.svg".to_string(),
            features: vec![],
            description: String::new(),
            availability: "Weekdays".to_string(),
        }
    }

    #[test]
    fn test_decode_prefers_facility() {
        let f = serde_json::to_string(&facility()).unwrap();
        let e = serde_json::to_string(&equipment()).unwrap();

        let both = Selection::decode(Some(&f), Some(&e)).unwrap();
        assert_eq!(both.kind(), "facility");

        let only_equipment = Selection::decode(None, Some(&e)).unwrap();
        assert_eq!(only_equipment.name(), "Portable Ultrasound Machine");
        assert_eq!(only_equipment.storage_key(), EQUIPMENT_KEY);

        assert!(Selection::decode(None, None).is_none());
    }

    #[test]
    fn test_decode_ignores_garbage() {
        let e = serde_json::to_string(&equipment()).unwrap();
        let fallback = Selection::decode(Some("{not json"), Some(&e)).unwrap();
        assert!(fallback.is_equipment());
        assert!(Selection::decode(Some("null"), Some("[]")).is_none());
    }

    #[test]
    fn test_units_and_totals() {
        let f = Selection::Facility(facility());
        assert_eq!(f.rate_unit(), "hr");
        assert_eq!(f.max_duration(), 12);
        assert_eq!(f.total_for(3), 2400);

        let e = Selection::Equipment(equipment());
        assert_eq!(e.duration_unit(), "days");
        assert_eq!(e.total_for(30), 10_500);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("4", 12), 4);
        assert_eq!(parse_duration("", 12), 1);
        assert_eq!(parse_duration("0", 12), 1);
        assert_eq!(parse_duration("abc", 30), 1);
        assert_eq!(parse_duration("45", 30), 30);
    }

    #[test]
    fn test_missing_information() {
        let f = Selection::Facility(facility());
        assert!(missing_information(None, "2024-11-01", "09:00"));
        assert!(missing_information(Some(&f), "", "09:00"));
        assert!(missing_information(Some(&f), "2024-11-01", "  "));
        assert!(!missing_information(Some(&f), "2024-11-01", "09:00"));
    }

    #[test]
    fn test_booking_request() {
        let e = Selection::Equipment(equipment());
        let request = booking_request(&e, " 2024-11-01 ", "08:30", 5);
        assert_eq!(request.item_type, "equipment");
        assert_eq!(request.item_id, 1);
        assert_eq!(request.booking_date, "2024-11-01");
        assert_eq!(request.duration, 5);
    }
}
