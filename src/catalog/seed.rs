//! Seeded catalog records
//!
//! The marketplace and CRM ship with a fixed catalog. Nothing here is ever
//! written back; the records live for the lifetime of the process.

use chrono::NaiveDate;

use crate::catalog::types::{
    Equipment, EquipmentCategory, Facility, FacilityType, Hcp, Hospital, Product, RelatedKind,
    RelatedTo, Task, TaskPriority, TaskStatus, Visit, VisitStatus,
};

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn hospitals() -> Vec<Hospital> {
    [
        (1, "Memorial Hospital", "San Francisco, CA", 12, 4.8),
        (2, "City Medical Center", "Los Angeles, CA", 8, 4.6),
        (3, "Valley General Hospital", "San Diego, CA", 15, 4.7),
        (4, "University Medical", "Sacramento, CA", 20, 4.9),
        (5, "Coastal Care Hospital", "Santa Barbara, CA", 6, 4.5),
    ]
    .into_iter()
    .map(|(id, name, location, facilities_count, rating)| Hospital {
        id,
        name: name.to_string(),
        location: location.to_string(),
        facilities_count,
        rating,
    })
    .collect()
}

pub fn facilities() -> Vec<Facility> {
    let facility = |id, name: &str, hospital: &str, location: &str, facility_type, price, features: &[&str]| Facility {
        id,
        name: name.to_string(),
        hospital: hospital.to_string(),
        location: location.to_string(),
        facility_type,
        price,
        image: PLACEHOLDER_IMAGE.to_string(),
        features: strings(features),
    };

    vec![
        facility(
            1,
            "Private Operating Room Suite A",
            "Memorial Hospital",
            "San Francisco, CA",
            FacilityType::OperatingRoom,
            1200,
            &["Robotic Surgery Equipment", "Advanced Monitoring", "Support Staff Available"],
        ),
        facility(
            2,
            "Imaging Center - MRI Unit",
            "City Medical Center",
            "Los Angeles, CA",
            FacilityType::Imaging,
            800,
            &["3T MRI Machine", "Digital Imaging System", "Technician Optional"],
        ),
        facility(
            3,
            "Cardiology Procedure Room",
            "Valley General Hospital",
            "San Diego, CA",
            FacilityType::ProcedureRoom,
            950,
            &["Cardiac Monitoring", "Cath Lab Equipment", "Recovery Area"],
        ),
        facility(
            4,
            "Dermatology Clinic Space",
            "University Medical",
            "Sacramento, CA",
            FacilityType::Clinic,
            500,
            &["Examination Rooms", "Procedure Room", "Reception Area"],
        ),
        facility(
            5,
            "Laboratory Suite B",
            "Coastal Care Hospital",
            "Santa Barbara, CA",
            FacilityType::Laboratory,
            750,
            &["Complete Lab Equipment", "Sample Storage", "Digital Analysis Tools"],
        ),
    ]
}

pub fn equipment() -> Vec<Equipment> {
    struct Row<'a> {
        id: u32,
        name: &'a str,
        hospital: &'a str,
        location: &'a str,
        category: EquipmentCategory,
        price: u32,
        features: &'a [&'a str],
        description: &'a str,
        availability: &'a str,
    }

    let rows = [
        Row {
            id: 1,
            name: "Portable Ultrasound Machine",
            hospital: "Memorial Hospital",
            location: "San Francisco, CA",
            category: EquipmentCategory::Diagnostic,
            price: 350,
            features: &["High Resolution", "Portable", "Battery Operated"],
            description: "Advanced portable ultrasound system with high-resolution imaging, perfect for bedside examinations and mobile clinics.",
            availability: "24/7",
        },
        Row {
            id: 2,
            name: "Surgical Microscope",
            hospital: "City Medical Center",
            location: "Los Angeles, CA",
            category: EquipmentCategory::Surgical,
            price: 500,
            features: &["HD Camera", "Digital Recording", "Precision Optics"],
            description: "High-definition surgical microscope with advanced imaging capabilities, ideal for delicate procedures requiring precision.",
            availability: "Weekdays 8AM-6PM",
        },
        Row {
            id: 3,
            name: "Portable X-Ray System",
            hospital: "Valley General Hospital",
            location: "San Diego, CA",
            category: EquipmentCategory::Imaging,
            price: 400,
            features: &["Wireless", "Digital Display", "Quick Setup"],
            description: "Mobile X-ray system with wireless capabilities, enabling rapid diagnostic imaging in any clinical environment.",
            availability: "24/7",
        },
        Row {
            id: 4,
            name: "Dermatology Laser System",
            hospital: "University Medical",
            location: "Sacramento, CA",
            category: EquipmentCategory::Treatment,
            price: 800,
            features: &["Multiple Settings", "Cooling System", "Touch Interface"],
            description: "State-of-the-art dermatological laser system with adjustable settings for various skin conditions and procedures.",
            availability: "Weekdays 9AM-5PM",
        },
        Row {
            id: 5,
            name: "Endoscopy System",
            hospital: "Coastal Care Hospital",
            location: "Santa Barbara, CA",
            category: EquipmentCategory::Diagnostic,
            price: 600,
            features: &["HD Imaging", "Recording Capability", "Multiple Probes"],
            description: "Comprehensive endoscopy system with high-definition imaging and recording features for internal examinations.",
            availability: "Monday-Saturday",
        },
    ];

    rows.into_iter()
        .map(|row| Equipment {
            id: row.id,
            name: row.name.to_string(),
            hospital: row.hospital.to_string(),
            location: row.location.to_string(),
            category: row.category,
            price: row.price,
            image: PLACEHOLDER_IMAGE.to_string(),
            features: strings(row.features),
            description: row.description.to_string(),
            availability: row.availability.to_string(),
        })
        .collect()
}

pub fn hcps() -> Vec<Hcp> {
    [
        (1, "Dr. Sarah Johnson", "Cardiologist", "Heart Care Center", "San Francisco", 5, 50_000),
        (2, "Dr. Michael Chen", "Neurologist", "Brain & Spine Institute", "Los Angeles", 4, 35_000),
        (3, "Dr. Emily Rodriguez", "Oncologist", "Cancer Treatment Center", "San Diego", 5, 75_000),
        (4, "Dr. James Wilson", "Pediatrician", "Children's Hospital", "Sacramento", 3, 25_000),
        (5, "Dr. Lisa Park", "Dermatologist", "Skin Care Clinic", "Santa Barbara", 4, 40_000),
    ]
    .into_iter()
    .map(|(id, name, specialty, organization, city, rating, potential_value)| Hcp {
        id,
        name: name.to_string(),
        specialty: specialty.to_string(),
        organization: organization.to_string(),
        city: city.to_string(),
        state: "CA".to_string(),
        rating,
        potential_value,
    })
    .collect()
}

pub fn visits() -> Vec<Visit> {
    vec![
        Visit {
            id: 1,
            date: date(2026, 10, 2),
            hcp_id: 1,
            products_discussed: strings(&["Cardiovex"]),
            notes: "Reviewed the latest outcomes data for Cardiovex. Dr. Johnson asked for the long-term safety summary.".to_string(),
            follow_up_date: Some(date(2026, 10, 30)),
            outcome: "Positive - requested samples".to_string(),
            status: VisitStatus::Completed,
        },
        Visit {
            id: 2,
            date: date(2026, 10, 21),
            hcp_id: 3,
            products_discussed: strings(&["Oncotrex", "Nauseaway"]),
            notes: "Present the new dosing guidance and supportive care options.".to_string(),
            follow_up_date: None,
            outcome: String::new(),
            status: VisitStatus::Planned,
        },
        Visit {
            id: 3,
            date: date(2026, 10, 24),
            hcp_id: 2,
            products_discussed: strings(&["Neurocalm"]),
            notes: "Introductory lunch meeting with the neurology group at Brain & Spine Institute.".to_string(),
            follow_up_date: None,
            outcome: String::new(),
            status: VisitStatus::Planned,
        },
        Visit {
            id: 4,
            date: date(2026, 10, 8),
            hcp_id: 4,
            products_discussed: strings(&["Pedisafe"]),
            notes: "Office closed for staff training.".to_string(),
            follow_up_date: Some(date(2026, 11, 5)),
            outcome: "Rescheduled by office".to_string(),
            status: VisitStatus::Canceled,
        },
        Visit {
            id: 5,
            date: date(2026, 11, 3),
            hcp_id: 5,
            products_discussed: strings(&["Dermaclear"]),
            notes: "Follow up on patient feedback for Dermaclear topical.".to_string(),
            follow_up_date: None,
            outcome: String::new(),
            status: VisitStatus::Planned,
        },
        Visit {
            id: 6,
            date: date(2026, 10, 19),
            hcp_id: 1,
            products_discussed: strings(&["Cardiovex"]),
            notes: "Drop off the long-term safety summary and sample kits.".to_string(),
            follow_up_date: None,
            outcome: String::new(),
            status: VisitStatus::Planned,
        },
        Visit {
            id: 7,
            date: date(2026, 11, 10),
            hcp_id: 3,
            products_discussed: strings(&["Oncotrex"]),
            notes: "Quarterly business review with the oncology department.".to_string(),
            follow_up_date: None,
            outcome: String::new(),
            status: VisitStatus::Planned,
        },
    ]
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Send safety summary".to_string(),
            description: "Email the Cardiovex long-term safety summary to Dr. Johnson.".to_string(),
            due_date: date(2026, 10, 17),
            priority: TaskPriority::High,
            status: TaskStatus::Pending,
            related_to: Some(RelatedTo { kind: RelatedKind::Hcp, id: 1 }),
        },
        Task {
            id: 2,
            title: "Prepare oncology deck".to_string(),
            description: "Update slides with the new Oncotrex dosing guidance.".to_string(),
            due_date: date(2026, 10, 20),
            priority: TaskPriority::Medium,
            status: TaskStatus::InProgress,
            related_to: Some(RelatedTo { kind: RelatedKind::Product, id: 2 }),
        },
        Task {
            id: 3,
            title: "Order sample kits".to_string(),
            description: "Request Cardiovex sample kits from the distribution center.".to_string(),
            due_date: date(2026, 10, 17),
            priority: TaskPriority::Low,
            status: TaskStatus::Pending,
            related_to: Some(RelatedTo { kind: RelatedKind::Product, id: 1 }),
        },
        Task {
            id: 4,
            title: "Confirm lunch meeting".to_string(),
            description: "Call the Brain & Spine Institute front desk to confirm headcount.".to_string(),
            due_date: date(2026, 10, 22),
            priority: TaskPriority::High,
            status: TaskStatus::Pending,
            related_to: Some(RelatedTo { kind: RelatedKind::Visit, id: 2 }),
        },
        Task {
            id: 5,
            title: "Submit expense report".to_string(),
            description: "File September travel and meal expenses.".to_string(),
            due_date: date(2026, 10, 10),
            priority: TaskPriority::Medium,
            status: TaskStatus::Completed,
            related_to: None,
        },
        Task {
            id: 6,
            title: "Territory planning".to_string(),
            description: "Draft Q1 call plan for the Santa Barbara territory.".to_string(),
            due_date: date(2026, 11, 1),
            priority: TaskPriority::Low,
            status: TaskStatus::Pending,
            related_to: None,
        },
    ]
}

pub fn products() -> Vec<Product> {
    let product = |id, name: &str, category: &str, description: &str, ingredient: &str, indications: &[&str], launch| Product {
        id,
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        active_ingredient: ingredient.to_string(),
        indications: strings(indications),
        launch_date: launch,
    };

    vec![
        product(
            1,
            "Cardiovex",
            "Cardiology",
            "Once-daily tablet for blood pressure management.",
            "Valsartan",
            &["Hypertension", "Heart failure"],
            date(2021, 3, 15),
        ),
        product(
            2,
            "Oncotrex",
            "Oncology",
            "Targeted therapy for advanced solid tumors.",
            "Imatinib",
            &["Chronic myeloid leukemia", "GIST"],
            date(2022, 9, 1),
        ),
        product(
            3,
            "Neurocalm",
            "Neurology",
            "Extended-release treatment for seizure control.",
            "Levetiracetam",
            &["Epilepsy"],
            date(2020, 6, 10),
        ),
        product(
            4,
            "Dermaclear",
            "Dermatology",
            "Topical cream for moderate plaque psoriasis.",
            "Calcipotriol",
            &["Psoriasis"],
            date(2023, 1, 20),
        ),
        product(
            5,
            "Nauseaway",
            "Oncology",
            "Supportive care for chemotherapy-induced nausea.",
            "Ondansetron",
            &["Chemotherapy-induced nausea"],
            date(2019, 11, 5),
        ),
        product(
            6,
            "Pedisafe",
            "Pediatrics",
            "Oral suspension antibiotic for children.",
            "Amoxicillin",
            &["Otitis media", "Strep throat"],
            date(2018, 4, 2),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_sizes() {
        assert_eq!(hospitals().len(), 5);
        assert_eq!(facilities().len(), 5);
        assert_eq!(equipment().len(), 5);
        assert_eq!(hcps().len(), 5);
    }

    #[test]
    fn test_seed_ids_unique() {
        let ids: HashSet<u32> = facilities().iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), 5);
        let ids: HashSet<u32> = equipment().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 5);
        let ids: HashSet<u32> = tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), tasks().len());
    }

    #[test]
    fn test_visits_reference_known_hcps() {
        let hcp_ids: HashSet<u32> = hcps().iter().map(|h| h.id).collect();
        assert!(visits().iter().all(|v| hcp_ids.contains(&v.hcp_id)));
    }

    #[test]
    fn test_every_facility_hospital_is_a_partner() {
        let names: HashSet<String> = hospitals().into_iter().map(|h| h.name).collect();
        assert!(facilities().iter().all(|f| names.contains(&f.hospital)));
        assert!(equipment().iter().all(|e| names.contains(&e.hospital)));
    }
}
