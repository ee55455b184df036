//! MedSpace Catalog
//!
//! Read-only records for both portals:
//!
//! - **types**: Record definitions (Facility, Equipment, Hcp, ...)
//! - **seed**: The seeded catalog shipped with the application
//! - **search**: Free-text search, marketplace filters, dashboard orderings
//!
//! The catalog is built once at startup and shared behind an `Arc`; nothing
//! mutates it afterwards.

pub mod search;
pub mod seed;
pub mod types;

pub use search::{
    due_state, filter_products_by_category, matches_query, pending_tasks, product_categories,
    search, top_hcps, truncate_notes, upcoming_visits, DueState, EquipmentFilter,
    FacilityFilter, Searchable,
};
pub use types::{
    Equipment, EquipmentCategory, Facility, FacilityType, Hcp, Hospital, Product, RelatedKind,
    RelatedTo, Task, TaskPriority, TaskStatus, Visit, VisitStatus,
};

use serde::Serialize;

use crate::booking::{BookableItem, BookingKind};

/// Number of entries the dashboard cards show
pub const DASHBOARD_LIMIT: usize = 4;

/// In-memory catalog of every read-only record
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub hospitals: Vec<Hospital>,
    pub facilities: Vec<Facility>,
    pub equipment: Vec<Equipment>,
    pub hcps: Vec<Hcp>,
    pub visits: Vec<Visit>,
    pub tasks: Vec<Task>,
    pub products: Vec<Product>,
}

/// Aggregated figures for the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub hospital_count: usize,
    pub facility_count: usize,
    pub equipment_count: usize,
    pub hcp_count: usize,
    pub upcoming_visits: Vec<Visit>,
    pub pending_tasks: Vec<Task>,
    pub top_hcps: Vec<Hcp>,
}

impl Catalog {
    /// Build the catalog from the seeded records
    pub fn seeded() -> Self {
        Self {
            hospitals: seed::hospitals(),
            facilities: seed::facilities(),
            equipment: seed::equipment(),
            hcps: seed::hcps(),
            visits: seed::visits(),
            tasks: seed::tasks(),
            products: seed::products(),
        }
    }

    pub fn facility(&self, id: u32) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.id == id)
    }

    pub fn equipment_item(&self, id: u32) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }

    pub fn hcp(&self, id: u32) -> Option<&Hcp> {
        self.hcps.iter().find(|h| h.id == id)
    }

    pub fn product(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Resolve a bookable item by kind and id
    pub fn bookable(&self, kind: BookingKind, id: u32) -> Option<BookableItem> {
        match kind {
            BookingKind::Facility => self.facility(id).cloned().map(BookableItem::Facility),
            BookingKind::Equipment => self.equipment_item(id).cloned().map(BookableItem::Equipment),
        }
    }

    /// Search visits by HCP name, HCP organization, notes, or outcome
    pub fn search_visits(&self, query: &str) -> Vec<&Visit> {
        let Some(needle) = search::normalize_query(query) else {
            return self.visits.iter().collect();
        };

        self.visits
            .iter()
            .filter(|visit| {
                let hcp_match = self.hcp(visit.hcp_id).map_or(false, |hcp| {
                    hcp.name.to_lowercase().contains(&needle)
                        || hcp.organization.to_lowercase().contains(&needle)
                });
                hcp_match
                    || visit.notes.to_lowercase().contains(&needle)
                    || visit.outcome.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Display name for whatever a task refers to
    pub fn related_entity_name(&self, task: &Task) -> String {
        let Some(related) = task.related_to else {
            return "N/A".to_string();
        };

        match related.kind {
            RelatedKind::Hcp => self
                .hcp(related.id)
                .map(|h| h.name.clone())
                .unwrap_or_else(|| "Unknown HCP".to_string()),
            RelatedKind::Product => self
                .product(related.id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Unknown Product".to_string()),
            RelatedKind::Visit => self
                .visits
                .iter()
                .find(|v| v.id == related.id)
                .and_then(|v| self.hcp(v.hcp_id))
                .map(|h| format!("Visit: {}", h.name))
                .unwrap_or_else(|| "Unknown Visit".to_string()),
        }
    }

    /// Build the dashboard summary
    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary {
            hospital_count: self.hospitals.len(),
            facility_count: self.facilities.len(),
            equipment_count: self.equipment.len(),
            hcp_count: self.hcps.len(),
            upcoming_visits: upcoming_visits(&self.visits, DASHBOARD_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
            pending_tasks: pending_tasks(&self.tasks, DASHBOARD_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
            top_hcps: top_hcps(&self.hcps, DASHBOARD_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
